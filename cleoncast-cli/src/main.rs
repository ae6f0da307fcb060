//! Binary crate for the `cleoncast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive location form and configuration prompt
//! - Logging setup and human-friendly output

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// `RUST_LOG` wins; otherwise only errors, or everything from our crates with `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "warn,cleoncast=debug,cleoncast_core=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
