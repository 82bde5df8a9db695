//! Dimension filters.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

/// Predicate over a dimension key.
pub type KeyPredicateFn<K> = Rc<dyn Fn(&K) -> bool>;

/// The filter applied to one dimension.
///
/// A record whose key is missing on the dimension passes only `All`.
pub enum Filter<K> {
    /// No restriction.
    All,
    /// Keys equal to the value.
    Exact(K),
    /// Keys in the half-open range `[low, high)`.
    Range(K, K),
    /// Keys in the set. Kept sorted for binary search.
    In(Vec<K>),
    /// Keys accepted by the predicate.
    Custom(KeyPredicateFn<K>),
}

impl<K: Ord> Filter<K> {
    /// Creates an exact-match filter.
    pub fn exact(key: K) -> Self {
        Filter::Exact(key)
    }

    /// Creates a half-open range filter.
    pub fn range(low: K, high: K) -> Self {
        Filter::Range(low, high)
    }

    /// Creates a set-membership filter.
    pub fn in_set(keys: impl IntoIterator<Item = K>) -> Self {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();
        Filter::In(keys)
    }

    /// Creates a filter from a key predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&K) -> bool + 'static,
    {
        Filter::Custom(Rc::new(predicate))
    }

    /// Returns true if this filter lets every record through.
    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// Tests a record's key against the filter.
    pub fn matches(&self, key: Option<&K>) -> bool {
        let key = match (self, key) {
            (Filter::All, _) => return true,
            (_, None) => return false,
            (_, Some(key)) => key,
        };
        match self {
            Filter::All => true,
            Filter::Exact(v) => key == v,
            Filter::Range(low, high) => key >= low && key < high,
            Filter::In(keys) => keys.binary_search(key).is_ok(),
            Filter::Custom(predicate) => predicate(key),
        }
    }
}

impl<K: Clone> Clone for Filter<K> {
    fn clone(&self) -> Self {
        match self {
            Filter::All => Filter::All,
            Filter::Exact(v) => Filter::Exact(v.clone()),
            Filter::Range(low, high) => Filter::Range(low.clone(), high.clone()),
            Filter::In(keys) => Filter::In(keys.clone()),
            Filter::Custom(predicate) => Filter::Custom(Rc::clone(predicate)),
        }
    }
}

impl<K> Default for Filter<K> {
    fn default() -> Self {
        Filter::All
    }
}

impl<K: fmt::Debug> fmt::Debug for Filter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("All"),
            Filter::Exact(v) => f.debug_tuple("Exact").field(v).finish(),
            Filter::Range(low, high) => f.debug_tuple("Range").field(low).field(high).finish(),
            Filter::In(keys) => f.debug_tuple("In").field(keys).finish(),
            Filter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
