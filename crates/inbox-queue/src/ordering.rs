//! Item ordering.
//!
//! # Ordering Rules
//!
//! 1. Higher category rank comes first (Boss > ... > OtherPerson > unknown)
//! 2. For the same rank, the later date comes first
//! 3. For the same rank and date, the earlier arrival comes first (FIFO)
//!
//! The comparison answers "does `a` belong above `b`": `Greater` means `a`
//! is served first. Rule 3 is inverted for that reason.

use std::cmp::Ordering;

use inbox_models::{DateKey, Item, Rank};

/// The fields of an item that decide its position in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityKey {
    rank: Rank,
    date: DateKey,
    sequence: u64,
}

impl PriorityKey {
    /// Extracts the key of an item.
    pub fn of(item: &Item) -> Self {
        Self {
            rank: item.rank(),
            date: item.date(),
            sequence: item.sequence(),
        }
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.date.cmp(&other.date))
            // Earlier arrival wins, so the smaller sequence is "greater"
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Compares two items by priority. `Greater` means `a` is served before `b`.
pub fn compare(a: &Item, b: &Item) -> Ordering {
    PriorityKey::of(a).cmp(&PriorityKey::of(b))
}
