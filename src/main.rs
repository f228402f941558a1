mod cli;
mod config;
mod diff;
mod errors;
mod json_utils;
mod report;
mod untranslated;

use anyhow::Result;
use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    // Load env variables from .env if present
    let _ = dotenvy::dotenv();
    // init logging; stdout is reserved for reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = <Cli as clap::Parser>::parse();
    cli::run(cli)
}
