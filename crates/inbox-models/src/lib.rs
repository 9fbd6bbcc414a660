//! Core data models for the inbox priority queue.
//!
//! This crate provides the value types the queue orders:
//!
//! - [`DateKey`]: `MM-DD-YYYY` dates mapped onto a totally ordered timestamp
//! - [`RankTable`]: the fixed category → rank table with its fallback rank
//! - [`Item`]: one queued email, stamped with an arrival sequence number
//!   handed out by a [`SequenceGenerator`]

pub mod date;
pub mod error;
pub mod item;
pub mod rank;

pub use date::DateKey;
pub use error::{ParseError, Result};
pub use item::{Item, SequenceGenerator};
pub use rank::{Rank, RankTable, DEFAULT_RANKS, FALLBACK_RANK};
