//! PriorityQueue - array-backed binary max-heap of items.
//!
//! Items live in a `Vec` laid out as an implicit complete binary tree:
//! the children of index `i` are `2i + 1` and `2i + 2`, its parent is
//! `(i - 1) / 2`. The root holds the item that [`compare`] ranks highest.
//!
//! Invariant (checked by [`PriorityQueue::is_heap`]): for every non-root
//! index `i`, `compare(heap[parent(i)], heap[i]) != Less`.

use std::cmp::Ordering;

use inbox_models::Item;

use crate::error::{QueueError, Result};
use crate::ordering::compare;

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

/// Binary max-heap ordered by [`compare`].
///
/// `insert` and `extract_max` are O(log n); `peek_max`, `len` and
/// `is_empty` are O(1).
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: Vec<Item>,
}

impl PriorityQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item and restores heap order.
    pub fn insert(&mut self, item: Item) {
        self.heap.push(item);
        self.sift_up(self.heap.len() - 1);
        debug_assert!(self.is_heap());
    }

    /// Returns the highest-priority item without removing it.
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if the queue has no items.
    pub fn peek_max(&self) -> Result<&Item> {
        self.heap.first().ok_or(QueueError::EmptyQueue)
    }

    /// Removes and returns the highest-priority item.
    ///
    /// Does nothing and returns `None` on an empty queue.
    pub fn extract_max(&mut self) -> Option<Item> {
        if self.heap.is_empty() {
            return None;
        }

        // Move the last leaf to the root, then push it down.
        let max = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        debug_assert!(self.is_heap());

        Some(max)
    }

    /// Removes and returns the highest-priority item.
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if the queue has no items.
    pub fn try_extract_max(&mut self) -> Result<Item> {
        self.extract_max().ok_or(QueueError::EmptyQueue)
    }

    /// Returns the number of items in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue has no items.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterates over the items in heap (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.heap.iter()
    }

    /// Consumes the queue, returning its items highest priority first.
    pub fn into_sorted_vec(mut self) -> Vec<Item> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(item) = self.extract_max() {
            sorted.push(item);
        }
        sorted
    }

    /// Returns true if every parent ranks at least as high as its children.
    pub fn is_heap(&self) -> bool {
        (1..self.heap.len())
            .all(|i| compare(&self.heap[parent(i)], &self.heap[i]) != Ordering::Less)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if compare(&self.heap[idx], &self.heap[p]) != Ordering::Greater {
                break;
            }
            self.heap.swap(idx, p);
            idx = p;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let (l, r) = (left(idx), right(idx));
            if l >= len {
                break;
            }

            // Larger child; left wins ties.
            let child = if r < len && compare(&self.heap[r], &self.heap[l]) == Ordering::Greater {
                r
            } else {
                l
            };

            if compare(&self.heap[child], &self.heap[idx]) != Ordering::Greater {
                break;
            }
            self.heap.swap(idx, child);
            idx = child;
        }
    }
}

impl Extend<Item> for PriorityQueue {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl FromIterator<Item> for PriorityQueue {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbox_models::{RankTable, SequenceGenerator};
    use proptest::prelude::*;

    fn item(seq: u64, category: &str, label: &str, date: &str) -> Item {
        Item::with_sequence(seq, category, label, date, &RankTable::new())
    }

    fn labels(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.label()).collect()
    }

    #[test]
    fn test_index_arithmetic() {
        assert_eq!(left(0), 1);
        assert_eq!(right(0), 2);
        assert_eq!(parent(1), 0);
        assert_eq!(parent(2), 0);
        assert_eq!(left(3), 7);
        assert_eq!(right(3), 8);
        assert_eq!(parent(7), 3);
        assert_eq!(parent(8), 3);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = PriorityQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek_max(), Err(QueueError::EmptyQueue));
        assert!(queue.extract_max().is_none());
        assert_eq!(queue.try_extract_max(), Err(QueueError::EmptyQueue));
        assert!(queue.is_heap());
    }

    #[test]
    fn test_insert_and_peek() {
        let mut queue = PriorityQueue::new();
        queue.insert(item(0, "Peer", "Lo", "01-01-2030"));
        queue.insert(item(1, "Boss", "Hi", "01-01-2030"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek_max().unwrap().label(), "Hi");
        // Peek does not remove
        assert_eq!(queue.peek_max().unwrap().label(), "Hi");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_priority_ordering() {
        let mut queue = PriorityQueue::new();

        // Insert in reverse priority order
        queue.insert(item(0, "Random", "Random", "01-01-2030"));
        queue.insert(item(1, "OtherPerson", "Other", "01-01-2030"));
        queue.insert(item(2, "ImportantPerson", "Important", "01-01-2030"));
        queue.insert(item(3, "Peer", "Peer", "01-01-2030"));
        queue.insert(item(4, "Subordinate", "Subordinate", "01-01-2030"));
        queue.insert(item(5, "Boss", "Boss", "01-01-2030"));

        let order = queue.into_sorted_vec();
        assert_eq!(
            labels(&order),
            vec!["Boss", "Subordinate", "Peer", "Important", "Other", "Random"]
        );
    }

    #[test]
    fn test_fifo_within_rank_and_date() {
        let mut queue = PriorityQueue::new();
        queue.insert(item(0, "Peer", "First", "05-05-2025"));
        queue.insert(item(1, "Peer", "Second", "05-05-2025"));
        queue.insert(item(2, "Peer", "Third", "05-05-2025"));

        assert_eq!(queue.extract_max().unwrap().label(), "First");
        assert_eq!(queue.extract_max().unwrap().label(), "Second");
        assert_eq!(queue.extract_max().unwrap().label(), "Third");
        assert!(queue.extract_max().is_none());
    }

    #[test]
    fn test_newer_first_within_rank() {
        let mut queue = PriorityQueue::new();
        queue.insert(item(0, "Boss", "Old", "01-01-2020"));
        queue.insert(item(1, "Boss", "New", "01-01-2030"));
        queue.insert(item(2, "Boss", "Middle", "01-01-2025"));

        assert_eq!(labels(&queue.into_sorted_vec()), vec!["New", "Middle", "Old"]);
    }

    #[test]
    fn test_extract_down_to_empty() {
        let mut queue: PriorityQueue = (0..5)
            .map(|i| item(i, "Peer", "x", "01-01-2030"))
            .collect();

        for remaining in (0..5).rev() {
            assert!(queue.extract_max().is_some());
            assert_eq!(queue.len(), remaining);
            assert!(queue.is_heap());
        }
        assert!(queue.extract_max().is_none());
    }

    #[test]
    fn test_sift_down_picks_larger_child() {
        // Root removal must promote the right child when it outranks the left.
        let mut queue = PriorityQueue::new();
        queue.insert(item(0, "Boss", "Root", "01-01-2030"));
        queue.insert(item(1, "OtherPerson", "Left", "01-01-2030"));
        queue.insert(item(2, "Subordinate", "Right", "01-01-2030"));
        queue.insert(item(3, "ImportantPerson", "Leaf", "01-01-2030"));

        queue.extract_max();
        assert_eq!(queue.peek_max().unwrap().label(), "Right");
        assert!(queue.is_heap());
    }

    #[test]
    fn test_iter_visits_all_items() {
        let queue: PriorityQueue = (0..4)
            .map(|i| item(i, "Peer", &format!("T{}", i), "01-01-2030"))
            .collect();

        let mut seen: Vec<u64> = queue.iter().map(|i| i.sequence()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    const CATEGORIES: &[&str] = &["Boss", "Subordinate", "Peer", "ImportantPerson", "OtherPerson", "Nobody"];
    const DATES: &[&str] = &["01-01-2020", "01-01-2030", "03-03-2003", "11-11-2011", "??"];

    /// Operations for the heap property test: `Some((c, d))` inserts, `None` extracts.
    fn arb_ops() -> impl Strategy<Value = Vec<Option<(usize, usize)>>> {
        prop::collection::vec(
            prop::option::weighted(0.7, (0..CATEGORIES.len(), 0..DATES.len())),
            0..64,
        )
    }

    proptest! {
        /// The heap invariant holds after every insert and extract.
        #[test]
        fn proptest_heap_invariant(ops in arb_ops()) {
            let ranks = RankTable::new();
            let mut seq = SequenceGenerator::new();
            let mut queue = PriorityQueue::new();
            let mut expected_len = 0usize;

            for op in ops {
                match op {
                    Some((c, d)) => {
                        queue.insert(Item::stamped(&mut seq, CATEGORIES[c], "s", DATES[d], &ranks));
                        expected_len += 1;
                    }
                    None => {
                        let removed = queue.extract_max();
                        prop_assert_eq!(removed.is_some(), expected_len > 0);
                        expected_len = expected_len.saturating_sub(1);
                    }
                }
                prop_assert!(queue.is_heap());
                prop_assert_eq!(queue.len(), expected_len);
            }
        }

        /// Draining the heap reproduces a full sort of everything inserted.
        #[test]
        fn proptest_extraction_matches_sort(
            picks in prop::collection::vec((0..CATEGORIES.len(), 0..DATES.len()), 0..64)
        ) {
            let ranks = RankTable::new();
            let mut seq = SequenceGenerator::new();
            let items: Vec<Item> = picks
                .iter()
                .map(|&(c, d)| Item::stamped(&mut seq, CATEGORIES[c], "s", DATES[d], &ranks))
                .collect();

            let mut expected = items.clone();
            expected.sort_by(|a, b| compare(b, a));

            let queue: PriorityQueue = items.into_iter().collect();
            prop_assert_eq!(queue.into_sorted_vec(), expected);
        }
    }
}
