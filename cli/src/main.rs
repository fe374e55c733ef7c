//! `bcc` binary entry point

use anyhow::Result;
use body_composition_cli::{
    commands::{execute, Cli},
    config::{self, LogConfig},
};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::AppConfig::load()?;

    init_tracing(&config.log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting body composition calculator"
    );
    debug!(command = ?cli.command, "parsed command");

    let report = execute(&cli.command, &config)?;
    println!("{}", report.body);

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(log: &LogConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.filter.as_str().into());

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if log.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
