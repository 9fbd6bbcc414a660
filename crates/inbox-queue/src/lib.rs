//! Priority queue and preview/commit session for the inbox.
//!
//! This crate provides:
//! - [`compare`]: the three-level item ordering (rank, then date, then arrival)
//! - [`PriorityQueue`]: an array-backed binary max-heap over that ordering
//! - [`SessionController`]: the `NEXT`/`READ` protocol layered on the heap
//!
//! # Example
//!
//! ```
//! use inbox_queue::{ReadOutcome, SessionController};
//!
//! let mut session = SessionController::new();
//! session.add("Peer", "Lunch?", "01-01-2030");
//! session.add("Boss", "Budget", "01-01-2020");
//!
//! // Preview the top item as often as needed
//! assert_eq!(session.next().unwrap().label(), "Budget");
//! assert_eq!(session.next().unwrap().label(), "Budget");
//!
//! // Commit it
//! assert!(matches!(session.read(), ReadOutcome::Committed(_)));
//! assert_eq!(session.count(), 1);
//! ```

pub mod error;
pub mod heap;
pub mod ordering;
pub mod session;

pub use error::{QueueError, Result};
pub use heap::PriorityQueue;
pub use ordering::{compare, PriorityKey};
pub use session::{ReadOutcome, SessionController, SessionState};
