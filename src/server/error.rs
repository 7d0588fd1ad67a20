//! Error types for the backend server.

use std::net::SocketAddr;

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Invalid or missing startup arguments.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The arguments did not match `<port> [delay]`, or help/version was requested.
    #[error(transparent)]
    Arguments(#[from] clap::Error),

    /// The port is not an integer.
    #[error("Invalid port {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),

    /// The port is an integer outside 1-65535.
    #[error("Port {0} is out of range: expected an integer between 1 and 65535")]
    PortOutOfRange(String),

    /// The delay is not a non-negative number of seconds.
    #[error("Invalid delay {0:?}: expected a non-negative number of seconds")]
    InvalidDelay(String),

    /// The delay is a non-negative number too large to wait for.
    #[error("Delay {0} is out of range: too many seconds to represent")]
    DelayOutOfRange(String),
}

/// Errors that can occur during backend operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The listening socket could not be created.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// The request head grew past the configured limit.
    #[error("Request head exceeds {0} bytes")]
    HeadTooLarge(usize),
}
