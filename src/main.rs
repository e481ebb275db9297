mod api;
mod application;
mod cli;
mod domain;
mod logging;
mod utils;

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::{
    api::{ApiClient, SpeedtestConfig},
    application::{RunAggregator, Sampler},
    cli::{Cli, Command},
    domain::{AppError, Result},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "speed test aborted");
            eprintln!("Error: {}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = SpeedtestConfig::new(cli.small_url, cli.medium_url, cli.large_url)?
        .with_timeout(cli.timeout)?;
    let client = ApiClient::new(config.timeout()).map_err(|e| {
        AppError::InvalidConfiguration(format!("cannot build HTTP client: {}", e))
    })?;
    let aggregator = RunAggregator::new(Sampler::new(client, config));

    let mut out = io::stdout().lock();
    match cli.command.unwrap_or(Command::Quick) {
        Command::Quick => {
            aggregator.quick(&mut out).await?;
        }
        Command::Test(args) => {
            aggregator.execute(&args.run_options(), &mut out).await?;
        }
    }
    Ok(())
}

/// Error message followed by any underlying causes it does not already mention
fn describe(err: &AppError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
