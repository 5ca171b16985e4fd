mod cli;
mod config;
mod service;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use screenvault_logging::{init_logging, LogFormat};
use service::CommandService;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let format = if config.logging.json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging(level, format)?;
    debug!("Running {:?}", cli.command);

    CommandService::new(config).run(cli.command).await
}
