//! SessionController - the preview/commit protocol over the priority queue.
//!
//! A session is `Idle` or `Previewing`. `next()` caches a copy of the top
//! item and keeps returning that copy until `read()` commits. `read()`
//! always removes the queue's *current* maximum, which is not necessarily
//! the cached copy: an item inserted after the preview that outranks it
//! will be the one removed. `next()` does not re-check the queue while a
//! preview is outstanding, so it can report a stale item.
//! [`SessionController::is_preview_stale`] exposes that condition and
//! `read()` logs it when it happens.

use inbox_models::{Item, RankTable, SequenceGenerator};
use tracing::{debug, warn};

use crate::heap::PriorityQueue;

/// Whether a preview is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No item has been previewed since the last commit.
    Idle,
    /// `next()` has cached a copy of the top item.
    Previewing,
}

/// What `read()` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A preview was outstanding; the queue maximum was removed.
    Committed(Item),
    /// No preview was outstanding; the queue maximum was removed unseen.
    Dropped(Item),
    /// The queue was empty; nothing happened.
    Empty,
}

impl ReadOutcome {
    /// The removed item, if any.
    pub fn item(&self) -> Option<&Item> {
        match self {
            ReadOutcome::Committed(item) | ReadOutcome::Dropped(item) => Some(item),
            ReadOutcome::Empty => None,
        }
    }
}

/// Owns the queue, the arrival counter and the preview slot.
///
/// All methods take `&mut self`; the session is meant to be driven by one
/// command loop.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    queue: PriorityQueue,
    ranks: RankTable,
    sequence: SequenceGenerator,
    previewed: Option<Item>,
}

impl SessionController {
    /// Creates an empty session with the standard rank table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session with a specific rank table.
    pub fn with_ranks(ranks: RankTable) -> Self {
        Self {
            ranks,
            ..Self::default()
        }
    }

    /// Builds an item with the next arrival number and queues it.
    ///
    /// Returns a copy of the queued item. An outstanding preview is left
    /// untouched.
    pub fn add(
        &mut self,
        category: impl Into<String>,
        label: impl Into<String>,
        date_text: impl Into<String>,
    ) -> Item {
        let item = Item::stamped(&mut self.sequence, category, label, date_text, &self.ranks);
        debug!(
            sequence = item.sequence(),
            category = %item.category(),
            rank = item.rank(),
            date = %item.date(),
            "Queued email"
        );
        self.queue.insert(item.clone());
        item
    }

    /// Returns the number of queued items.
    pub fn count(&self) -> usize {
        self.queue.len()
    }

    /// Previews the top item.
    ///
    /// When idle, caches a copy of the queue maximum and returns it. When a
    /// preview is already outstanding, returns the cached copy without
    /// looking at the queue again. Returns `None` if idle and the queue is
    /// empty.
    pub fn next(&mut self) -> Option<&Item> {
        if self.previewed.is_none() {
            let top = self.queue.peek_max().ok()?.clone();
            debug!(sequence = top.sequence(), "Previewing email");
            self.previewed = Some(top);
        }
        self.previewed.as_ref()
    }

    /// Commits: removes the queue maximum and clears any preview.
    pub fn read(&mut self) -> ReadOutcome {
        let previewed = self.previewed.take();
        let Some(removed) = self.queue.extract_max() else {
            return ReadOutcome::Empty;
        };

        match previewed {
            Some(shown) => {
                if shown.sequence() != removed.sequence() {
                    warn!(
                        previewed = shown.sequence(),
                        removed = removed.sequence(),
                        "Committed email differs from previewed email"
                    );
                }
                debug!(sequence = removed.sequence(), "Committed email");
                ReadOutcome::Committed(removed)
            }
            None => {
                debug!(sequence = removed.sequence(), "Dropped email without preview");
                ReadOutcome::Dropped(removed)
            }
        }
    }

    /// Current protocol state.
    pub fn state(&self) -> SessionState {
        if self.previewed.is_some() {
            SessionState::Previewing
        } else {
            SessionState::Idle
        }
    }

    /// The cached preview, if one is outstanding.
    pub fn previewed(&self) -> Option<&Item> {
        self.previewed.as_ref()
    }

    /// True if a preview is outstanding but no longer the queue maximum.
    pub fn is_preview_stale(&self) -> bool {
        match (&self.previewed, self.queue.peek_max()) {
            (Some(shown), Ok(top)) => shown.sequence() != top.sequence(),
            _ => false,
        }
    }

    /// The rank table items are built with.
    pub fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    /// Read-only view of the underlying queue.
    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }
}
