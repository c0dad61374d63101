//! Orchestrate CLI - multi-repository build and test orchestrator
//!
//! Entry point for the orchestrate command-line application.

use anyhow::Result;
use clap::Parser;

use orchestrate::cli::output::{display_error, OutputConfig};
use orchestrate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; -v raises the level, -q drops to errors
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = OutputConfig::new(cli.quiet, cli.json);

    // Run the command and handle errors
    match cli.run(&output).await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
