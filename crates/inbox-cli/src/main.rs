//! Inbox CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use inbox_cli::cli::Cli;
use inbox_cli::commands;

fn main() {
    // Load .env.local if it exists (for INBOX_STRICT etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Initialize tracing; stdout carries command output only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::execute(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
