//! Dimensions: keyed projections used for grouping, filtering and ordering.

use crate::filter::Filter;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use equity_core::RecordId;

/// Identifier of a dimension inside its crossfilter.
///
/// Each dimension owns one bit of the per-record filter mask, so a
/// crossfilter supports at most `MAX_DIMENSIONS` of them.
pub type DimensionId = u32;

/// Per-record filter mask. Bit `d` is set when the record fails the
/// filter of dimension `d`.
pub type FilterMask = u64;

/// Upper bound on dimensions per crossfilter.
pub const MAX_DIMENSIONS: u32 = FilterMask::BITS;

/// Returns the mask bit owned by a dimension.
#[inline]
pub(crate) fn dimension_bit(id: DimensionId) -> FilterMask {
    1 << id
}

pub(crate) struct DimensionState<K> {
    pub(crate) keys: Vec<Option<K>>,
    /// Keyed records by ascending key, ties by record order.
    pub(crate) ascending: Vec<RecordId>,
    /// Keyed records by descending key, ties by record order.
    pub(crate) descending: Vec<RecordId>,
    pub(crate) filter: Filter<K>,
}

impl<K: Ord> DimensionState<K> {
    pub(crate) fn new(keys: Vec<Option<K>>) -> Self {
        let mut ascending: Vec<RecordId> = (0..keys.len()).filter(|&id| keys[id].is_some()).collect();
        let mut descending = ascending.clone();
        // Both sorts are stable and start from record order.
        ascending.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        descending.sort_by(|&a, &b| keys[b].cmp(&keys[a]));
        Self {
            keys,
            ascending,
            descending,
            filter: Filter::All,
        }
    }
}

/// Lets the crossfilter clear filters without knowing the key type.
pub(crate) trait FilterSlot {
    fn reset(&mut self);
}

impl<K> FilterSlot for DimensionState<K> {
    fn reset(&mut self) {
        self.filter = Filter::All;
    }
}

/// A keyed projection over the records of one crossfilter.
///
/// Created by `Crossfilter::dimension`. The handle is cheap to clone; all
/// clones refer to the same dimension and filter.
pub struct Dimension<K> {
    pub(crate) owner: u64,
    pub(crate) id: DimensionId,
    pub(crate) state: Rc<RefCell<DimensionState<K>>>,
}

impl<K> Clone for Dimension<K> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            id: self.id,
            state: Rc::clone(&self.state),
        }
    }
}

impl<K: Ord + Clone> Dimension<K> {
    /// Returns the dimension ID.
    #[inline]
    pub fn id(&self) -> DimensionId {
        self.id
    }

    /// Returns the key of a record, or None when the record has no key.
    pub fn key(&self, record: RecordId) -> Option<K> {
        self.state.borrow().keys.get(record).cloned().flatten()
    }

    /// Number of records that have a key on this dimension.
    pub fn keyed_len(&self) -> usize {
        self.state.borrow().ascending.len()
    }

    /// Returns true if a filter other than `All` is applied.
    pub fn has_filter(&self) -> bool {
        !self.state.borrow().filter.is_all()
    }

    /// Returns the filter currently applied to this dimension.
    pub fn current_filter(&self) -> Filter<K> {
        self.state.borrow().filter.clone()
    }

    /// Tests a record against this dimension's current filter alone.
    pub fn passes(&self, record: RecordId) -> bool {
        let state = self.state.borrow();
        match state.keys.get(record) {
            Some(key) => state.filter.matches(key.as_ref()),
            None => false,
        }
    }

    /// Returns the distinct keys in ascending order.
    pub fn distinct_keys(&self) -> Vec<K> {
        let state = self.state.borrow();
        let mut keys: Vec<K> = state
            .ascending
            .iter()
            .filter_map(|&id| state.keys[id].clone())
            .collect();
        keys.dedup();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_order_is_stable() {
        let state = DimensionState::new(vec![Some(3), Some(1), None, Some(3), Some(1)]);
        assert_eq!(state.ascending, vec![1, 4, 0, 3]);
        assert_eq!(state.descending, vec![0, 3, 1, 4]);
    }

    #[test]
    fn test_reset_clears_filter() {
        let mut state = DimensionState::new(vec![Some(1u32)]);
        state.filter = Filter::exact(1);
        state.reset();
        assert!(state.filter.is_all());
    }

    #[test]
    fn test_dimension_bit() {
        assert_eq!(dimension_bit(0), 1);
        assert_eq!(dimension_bit(5), 32);
        assert_eq!(MAX_DIMENSIONS, 64);
    }
}
