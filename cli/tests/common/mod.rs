//! Shared helpers for CLI integration tests

use body_composition_cli::{
    commands::{execute, Cli, Report},
    config::AppConfig,
};
use clap::Parser;
use std::path::PathBuf;

/// Absolute path to a file under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse an argument list the way the binary does and run it with default config
pub fn run(args: &[&str]) -> anyhow::Result<Report> {
    let cli = Cli::try_parse_from(std::iter::once("bcc").chain(args.iter().copied()))?;
    execute(&cli.command, &AppConfig::default())
}
