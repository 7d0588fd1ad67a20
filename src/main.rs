//! `delayed-backend <port> [delay]`
//!
//! Runs until the process is killed.

use std::process::ExitCode;

use delayed_backend::cli;
use delayed_backend::{ConfigError, HttpServer, ServerError};
use env_logger::Env;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        // Usage errors, --help and --version are reported by clap itself
        Err(ServerError::Config(ConfigError::Arguments(e))) => e.exit(),
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = cli::parse_args(std::env::args_os())?;
    let server = HttpServer::bind(config).await?;
    server.serve().await;
    Ok(())
}
