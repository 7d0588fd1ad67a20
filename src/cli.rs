//! Command-line arguments: `<port> [delay]`.

use std::ffi::OsString;

use clap::Parser;

use crate::server::{ConfigError, ServerConfig, parse_delay, parse_port};

/// A synthetic HTTP backend that answers every request with `backend <port>`.
#[derive(Debug, Parser)]
#[command(name = "delayed-backend", version, about)]
pub struct Args {
    /// TCP port to listen on (1-65535)
    #[arg(value_name = "PORT", allow_negative_numbers = true)]
    pub port: String,

    /// Seconds to wait before answering each request
    #[arg(value_name = "DELAY", default_value = "0", allow_negative_numbers = true)]
    pub delay: String,
}

impl TryFrom<Args> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let port = parse_port(&args.port)?;
        let delay = parse_delay(&args.delay)?;
        Ok(ServerConfig::new(port, delay))
    }
}

/// Parse the process arguments (program name first) into a configuration.
pub fn parse_args<I, T>(args: I) -> Result<ServerConfig, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args)?;
    ServerConfig::try_from(args)
}
