//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur while parsing an HTTP request head.
#[derive(Debug, Error)]
pub enum Error {
    /// The method is not a valid token.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is invalid or missing.
    #[error("Invalid HTTP path")]
    InvalidPath,

    /// The request line is malformed (wrong format or missing components).
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The version field is not of the form `HTTP/x.y`.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// The version is well formed but not HTTP/1.0 or HTTP/1.1.
    #[error("Unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// A header line has an invalid format.
    #[error("Invalid header format")]
    InvalidHeaderFormat,

    /// The `Content-Length` header is not a single non-negative integer.
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// The request line or a header name is not valid UTF-8.
    #[error("Request line or header name is not valid UTF-8")]
    InvalidEncoding,

    /// The request is empty.
    #[error("Empty request")]
    EmptyRequest,
}
