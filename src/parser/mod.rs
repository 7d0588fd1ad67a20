//! HTTP/1.x request parser.
//!
//! Only the request head is parsed here. Bodies are never interpreted by the
//! backend; the connection loop uses [`HttpRequest::body_framing`] to skip
//! them.

mod request;
mod method;
mod version;
mod error;

// Re-export public items
pub use request::{BodyFraming, HttpRequest};
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
