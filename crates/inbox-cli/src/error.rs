//! Error types for the command processor and CLI.

use std::io;
use std::path::PathBuf;

use inbox_models::ParseError;
use thiserror::Error;

/// Problems with a single input line. None of these stop a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// `EMAIL` line without all three comma-separated fields.
    #[error("EMAIL line has {found} of 3 fields: {line:?}")]
    MalformedEmail { line: String, found: usize },

    /// `EMAIL` line whose date field does not parse.
    #[error("EMAIL line has an invalid date: {0}")]
    InvalidDate(#[from] ParseError),

    /// Line that matches no command keyword.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

/// Errors that end a CLI run.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failed to open the input file.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read input or write output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Interactive line editor failure.
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Failed to render the run summary.
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
