//! Sender category ranks.
//!
//! Higher rank = higher priority. The default table is
//! Boss (5) > Subordinate (4) > Peer (3) > ImportantPerson (2) > OtherPerson (1).
//! Any other category gets [`FALLBACK_RANK`], below every known category.
//! [`RankTable::with_rank`] adds or overrides entries.

use std::collections::HashMap;

use serde::Serialize;

/// Numeric priority of a category.
pub type Rank = u8;

/// Rank of a category that is not in the table.
pub const FALLBACK_RANK: Rank = 0;

/// Known categories and their ranks, highest first.
pub const DEFAULT_RANKS: &[(&str, Rank)] = &[
    ("Boss", 5),
    ("Subordinate", 4),
    ("Peer", 3),
    ("ImportantPerson", 2),
    ("OtherPerson", 1),
];

/// Lookup table from category name to rank.
///
/// Category names are caller-supplied strings, so lookup never fails:
/// unknown (including differently cased) names resolve to the fallback rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankTable {
    ranks: HashMap<String, Rank>,
    fallback: Rank,
}

impl Default for RankTable {
    fn default() -> Self {
        Self {
            ranks: DEFAULT_RANKS
                .iter()
                .map(|(name, rank)| (name.to_string(), *rank))
                .collect(),
            fallback: FALLBACK_RANK,
        }
    }
}

impl RankTable {
    /// Creates the standard table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rank of `category`, adding it if it is not in the table.
    pub fn with_rank(mut self, category: impl Into<String>, rank: Rank) -> Self {
        self.ranks.insert(category.into(), rank);
        self
    }

    /// Returns the rank of `category`, or the fallback rank if unknown.
    pub fn rank(&self, category: &str) -> Rank {
        self.ranks.get(category).copied().unwrap_or(self.fallback)
    }

    /// Returns true if `category` has an entry in the table.
    pub fn is_known(&self, category: &str) -> bool {
        self.ranks.contains_key(category)
    }

    /// Rank assigned to unknown categories.
    pub fn fallback(&self) -> Rank {
        self.fallback
    }

    /// Known categories, highest rank first.
    pub fn categories(&self) -> Vec<(&str, Rank)> {
        let mut entries: Vec<(&str, Rank)> = self
            .ranks
            .iter()
            .map(|(name, rank)| (name.as_str(), *rank))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
