//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::processor::{IngestPolicy, ProcessorConfig};

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.1.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Inbox - read emails in priority order
#[derive(Parser, Debug)]
#[command(name = "inbox")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Skip EMAIL lines with missing fields or invalid dates instead of queueing them
    #[arg(long, env = "INBOX_STRICT", global = true)]
    pub strict: bool,

    /// Print a run summary to stderr when done
    #[arg(long, value_enum, default_value = "none", global = true)]
    pub summary: SummaryFormat,

    /// Path to state directory (REPL history)
    #[arg(long, env = "INBOX_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Process a command file
    Run {
        /// Command file to read ("-" or omitted for stdin)
        file: Option<PathBuf>,

        /// Echo each command before its output
        #[arg(short, long)]
        echo: bool,
    },

    /// Enter commands interactively
    Repl,
}

/// Format for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    /// No summary.
    #[default]
    None,
    /// One human-readable line.
    Text,
    /// JSON object.
    Json,
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".inbox"))
                .unwrap_or_else(|| PathBuf::from(".inbox"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Processor configuration from the flags.
    pub fn processor_config(&self) -> ProcessorConfig {
        let policy = if self.strict {
            IngestPolicy::Strict
        } else {
            IngestPolicy::Lenient
        };
        let echo = matches!(self.command, Some(Commands::Run { echo: true, .. }));

        ProcessorConfig::new().with_policy(policy).with_echo(echo)
    }
}
