//! The backend server.
//!
//! Binds a TCP listener and answers every HTTP request with `200 OK` and the
//! body `backend <port>\n`, after the configured delay.

mod response;
mod config;
mod error;
mod http_server;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::{ServerConfig, parse_delay, parse_port};
pub use error::{ConfigError, Error};
pub use http_server::HttpServer;
