//! Binary crate for the `weatherdash` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive search sessions and configuration
//! - Human-friendly dashboard output

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}
