//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::IntErrorKind;
use std::time::Duration;

use crate::server::error::ConfigError;

/// Backend configuration, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// The port to listen on, echoed back in every response body.
    ///
    /// Zero asks the OS for an ephemeral port; the bound port is then used
    /// in the body instead.
    pub port: u16,
    /// How long to wait before answering each request.
    pub delay: Duration,
    /// The interface to bind to.
    pub bind_ip: IpAddr,
    /// The socket read size.
    pub read_buffer_size: usize,
    /// The largest request head (request line plus headers) accepted.
    pub max_head_size: usize,
}

impl ServerConfig {
    /// Create a configuration for `port` and `delay`, with defaults for the rest.
    pub fn new(port: u16, delay: Duration) -> Self {
        Self {
            port,
            delay,
            ..Self::default()
        }
    }

    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// The response body sent for every request.
    pub fn body(&self) -> String {
        format!("backend {port}\n", port = self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            delay: Duration::ZERO,
            bind_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            read_buffer_size: 8192,
            max_head_size: 64 * 1024,
        }
    }
}

/// Parse a TCP port in the range 1-65535.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(0) => Err(ConfigError::PortOutOfRange(value.to_string())),
        Ok(port) => Ok(port),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => {
            Err(ConfigError::PortOutOfRange(value.to_string()))
        }
        Err(_) => Err(ConfigError::InvalidPort(value.to_string())),
    }
}

/// Parse a non-negative, finite number of seconds.
pub fn parse_delay(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDelay(value.to_string());

    let seconds: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }
    // -0.0 passes the sign check above and is just zero
    Duration::try_from_secs_f64(seconds.abs())
        .map_err(|_| ConfigError::DelayOutOfRange(value.to_string()))
}
