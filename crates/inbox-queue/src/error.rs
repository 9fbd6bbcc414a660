//! Error types for queue operations.

use thiserror::Error;

/// Errors that can occur during queue operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Peek or extract on a queue with no items.
    #[error("No emails to read.")]
    EmptyQueue,
}

/// Result type alias for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
