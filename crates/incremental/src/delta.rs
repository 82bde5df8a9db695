//! Delta type for incremental aggregation.
//!
//! A Delta records a record entering (+1) or leaving (-1) a visible set.
//! Filter changes are turned into delta batches which are then replayed
//! against every group's reducer.

use alloc::vec::Vec;

/// A differential change to a visible set.
///
/// The `diff` field indicates the direction of the change:
/// - `+1` means the item entered the set (reducer `add`)
/// - `-1` means the item left the set (reducer `remove`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta<T> {
    /// The item being changed
    pub data: T,
    /// The differential: +1 for enter, -1 for leave
    pub diff: i32,
}

impl<T> Delta<T> {
    /// Creates a new delta with the given data and diff.
    #[inline]
    pub fn new(data: T, diff: i32) -> Self {
        Self { data, diff }
    }

    /// Creates an insertion delta (+1).
    #[inline]
    pub fn insert(data: T) -> Self {
        Self::new(data, 1)
    }

    /// Creates a deletion delta (-1).
    #[inline]
    pub fn delete(data: T) -> Self {
        Self::new(data, -1)
    }

    /// Returns true if this is an insertion (diff > 0).
    #[inline]
    pub fn is_insert(&self) -> bool {
        self.diff > 0
    }

    /// Returns true if this is a deletion (diff < 0).
    #[inline]
    pub fn is_delete(&self) -> bool {
        self.diff < 0
    }

    /// Negates the diff (turns insert into delete and vice versa).
    #[inline]
    pub fn negate(self) -> Self {
        Self::new(self.data, -self.diff)
    }
}

/// A batch of deltas.
pub type DeltaBatch<T> = Vec<Delta<T>>;

/// Extension trait for working with delta batches.
pub trait DeltaBatchExt<T> {
    /// Number of insertions in the batch.
    fn inserted(&self) -> usize;

    /// Number of deletions in the batch.
    fn deleted(&self) -> usize;

    /// Returns the net effect count (sum of all diffs).
    fn net_count(&self) -> i64;
}

impl<T> DeltaBatchExt<T> for DeltaBatch<T> {
    fn inserted(&self) -> usize {
        self.iter().filter(|d| d.is_insert()).count()
    }

    fn deleted(&self) -> usize {
        self.iter().filter(|d| d.is_delete()).count()
    }

    fn net_count(&self) -> i64 {
        self.iter().map(|d| d.diff as i64).sum()
    }
}
