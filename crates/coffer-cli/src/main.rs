//! Coffer CLI binary entrypoint.
//!
//! Reads its configuration from flags or the environment (`API_URL`,
//! `IDENTITY_URL`, `ACCESS_TOKEN`, `PROJECT_NAME`, `STATE_FILE`) and runs
//! the full client contract end-to-end against the in-process vault core.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod demo;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = cli::Cli::parse();

    match demo::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
