//! Queued email items.
//!
//! An item is built once per `EMAIL` command and never changes afterwards:
//! its rank and date key are derived at construction and cached.

use serde::Serialize;

use crate::date::DateKey;
use crate::rank::{Rank, RankTable};

/// Hands out strictly increasing arrival sequence numbers.
///
/// Each generator starts at 0. Items stamped by the same generator never
/// share a sequence number, which makes the arrival tie-break total.
#[derive(Debug, Clone, Default)]
pub struct SequenceGenerator {
    next: u64,
}

impl SequenceGenerator {
    /// Creates a generator starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence number.
    pub fn next_sequence(&mut self) -> u64 {
        let seq = self.next;
        self.next += 1;
        seq
    }

    /// Number of sequence numbers issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// An email waiting in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    category: String,
    label: String,
    date_text: String,
    date: DateKey,
    rank: Rank,
    sequence: u64,
}

impl Item {
    /// Creates an item with a caller-chosen sequence number, deriving its
    /// rank from `ranks` and its date key from `date_text`.
    ///
    /// Nothing here checks that `sequence` is unique. Items that share a
    /// sequence number with the same rank and date compare equal, so
    /// ordinary callers should use [`Item::stamped`].
    ///
    /// An unparseable date falls back to [`DateKey::EPOCH`]; the original
    /// text is kept for display either way.
    pub fn with_sequence(
        sequence: u64,
        category: impl Into<String>,
        label: impl Into<String>,
        date_text: impl Into<String>,
        ranks: &RankTable,
    ) -> Self {
        let category = category.into();
        let date_text = date_text.into();
        Self {
            rank: ranks.rank(&category),
            date: DateKey::parse_or_epoch(&date_text),
            category,
            label: label.into(),
            date_text,
            sequence,
        }
    }

    /// Creates an item stamped with the generator's next sequence number.
    pub fn stamped(
        sequence: &mut SequenceGenerator,
        category: impl Into<String>,
        label: impl Into<String>,
        date_text: impl Into<String>,
        ranks: &RankTable,
    ) -> Self {
        Self::with_sequence(sequence.next_sequence(), category, label, date_text, ranks)
    }

    /// Sender category as given on the command line.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free-text subject line.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Date exactly as it was written.
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Parsed date key.
    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Category rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Arrival sequence number; lower arrived earlier.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}
