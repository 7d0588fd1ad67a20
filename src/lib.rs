//! A minimal HTTP backend for testing load balancers, proxies and routers.
//!
//! The server listens on a port and answers every request, whatever its
//! method or path, with `200 OK` and the body `backend <port>\n`. An optional
//! fixed delay before each response simulates a slow backend.
//!
//! # Features
//!
//! - Identical response for every HTTP method and request target
//! - Fixed per-request delay that only suspends the request being served
//! - One task per connection, with HTTP/1.1 keep-alive and pipelining
//! - A small HTTP/1.x request-head parser with descriptive errors
//!
//! # Examples
//!
//! ## Running a backend
//!
//! ```no_run
//! use std::time::Duration;
//! use delayed_backend::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), delayed_backend::ServerError> {
//! let config = ServerConfig::new(8080, Duration::from_millis(500));
//! let server = HttpServer::bind(config).await?;
//! server.serve().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing a request head
//!
//! ```
//! use delayed_backend::{parse_request, Method};
//!
//! let request = parse_request(b"GET /health HTTP/1.1\r\nHost: lb\r\n\r\n").unwrap();
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.path, "/health");
//! assert!(request.keep_alive());
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Export the command-line module
pub mod cli;

// Re-export commonly used items for convenience
pub use parser::{BodyFraming, Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use server::{ConfigError, Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
