//! Error types for model construction.

use thiserror::Error;

/// Errors that can occur while parsing model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Text does not have the `MM-DD-YYYY` shape.
    #[error("invalid date format (expected MM-DD-YYYY): {0:?}")]
    InvalidFormat(String),

    /// Text has the right shape but names a day that does not exist.
    #[error("no such calendar date: {0:?}")]
    InvalidDate(String),
}

/// Result type alias for model parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
