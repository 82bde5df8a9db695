//! The crossfilter context.
//!
//! A `Crossfilter` owns the record set and the per-record filter masks, and
//! routes every filter change to the groups it affects. Each group only sees
//! the records that pass the filters of every dimension other than its own,
//! so filtering a dimension never changes that dimension's own groups.

use crate::delta::{Delta, DeltaBatch, DeltaBatchExt};
use crate::dimension::{dimension_bit, Dimension, DimensionId, DimensionState, FilterMask, FilterSlot, MAX_DIMENSIONS};
use crate::filter::Filter;
use crate::group::{AllSink, Group, GroupAll, GroupSink, KeyedSink};
use crate::reduce::{Count, FnReducer, Reducer};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::sync::atomic::{AtomicU64, Ordering};
use equity_core::{Error, RecordId, Result};

/// Global counter used to tag dimensions with the crossfilter that made them.
static NEXT_CROSSFILTER_ID: AtomicU64 = AtomicU64::new(0);

struct GroupSlot<T> {
    /// Mask bit of the group's own dimension, 0 for group-all.
    own: FilterMask,
    sink: Rc<RefCell<dyn GroupSink<T>>>,
}

/// Shared filtering context over an in-memory record set.
///
/// # Example
///
/// ```ignore
/// let mut cf = Crossfilter::new(records);
/// let by_sex = cf.dimension(|r: &SalaryRecord| r.sex)?;
/// let by_discipline = cf.dimension(|r: &SalaryRecord| r.discipline.clone())?;
/// let head_count = cf.group(&by_sex)?.count();
///
/// cf.filter_exact(&by_discipline, "A".into())?;
/// // head_count now only counts discipline A
/// ```
pub struct Crossfilter<T> {
    id: u64,
    records: Vec<T>,
    masks: Vec<FilterMask>,
    dimensions: Vec<Rc<RefCell<dyn FilterSlot>>>,
    groups: Vec<GroupSlot<T>>,
}

impl<T: 'static> Crossfilter<T> {
    /// Creates a crossfilter over the given records, all active.
    pub fn new(records: Vec<T>) -> Self {
        let masks = alloc::vec![0; records.len()];
        Self {
            id: NEXT_CROSSFILTER_ID.fetch_add(1, Ordering::SeqCst),
            records,
            masks,
            dimensions: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Number of records.
    #[inline]
    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// Returns all records in load order.
    #[inline]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Returns a record by ID.
    #[inline]
    pub fn record(&self, id: RecordId) -> Option<&T> {
        self.records.get(id)
    }

    /// Number of dimensions created so far.
    #[inline]
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// Creates a dimension keyed by `key_fn`.
    pub fn dimension<K, F>(&mut self, key_fn: F) -> Result<Dimension<K>>
    where
        K: Ord + Clone + 'static,
        F: Fn(&T) -> K,
    {
        self.dimension_opt(|record| Some(key_fn(record)))
    }

    /// Creates a dimension whose key may be missing for some records.
    ///
    /// Records without a key are left out of the dimension's ordering and
    /// groups, and fail every filter on it other than `Filter::All`.
    pub fn dimension_opt<K, F>(&mut self, key_fn: F) -> Result<Dimension<K>>
    where
        K: Ord + Clone + 'static,
        F: Fn(&T) -> Option<K>,
    {
        let next = self.dimensions.len() as u32;
        if next >= MAX_DIMENSIONS {
            return Err(Error::invalid_operation(format!(
                "a crossfilter supports at most {} dimensions",
                MAX_DIMENSIONS
            )));
        }
        let keys: Vec<Option<K>> = self.records.iter().map(key_fn).collect();
        let state = Rc::new(RefCell::new(DimensionState::new(keys)));
        self.dimensions.push(Rc::clone(&state) as Rc<RefCell<dyn FilterSlot>>);
        log::debug!("created dimension {} over {} records", next, self.records.len());
        Ok(Dimension {
            owner: self.id,
            id: next,
            state,
        })
    }

    /// Starts a group over a dimension, keyed by the dimension key.
    pub fn group<K>(&mut self, dimension: &Dimension<K>) -> Result<GroupBuilder<'_, T, K>>
    where
        K: Ord + Clone + 'static,
    {
        self.check_owner(dimension)?;
        let keys = dimension.state.borrow().keys.clone();
        Ok(GroupBuilder {
            crossfilter: self,
            dimension: dimension.id,
            keys,
        })
    }

    /// Creates a single accumulator over the records passing every filter.
    pub fn group_all<R>(&mut self, reducer: R) -> GroupAll<R::Acc>
    where
        R: Reducer<T> + 'static,
    {
        let mut acc = reducer.init();
        for (id, record) in self.records.iter().enumerate() {
            if self.masks[id] == 0 {
                reducer.add(&mut acc, record);
            }
        }
        let value = Rc::new(RefCell::new(acc));
        self.groups.push(GroupSlot {
            own: 0,
            sink: Rc::new(RefCell::new(AllSink::new(reducer, Rc::clone(&value)))),
        });
        GroupAll::new(value)
    }

    /// Applies a filter to a dimension, replacing its previous filter.
    ///
    /// Returns the records that entered or left the active set.
    pub fn filter<K>(&mut self, dimension: &Dimension<K>, filter: Filter<K>) -> Result<DeltaBatch<RecordId>>
    where
        K: Ord + Clone + 'static,
    {
        self.check_owner(dimension)?;
        let bit = dimension_bit(dimension.id);
        let mut changes = Vec::new();
        {
            let mut state = dimension.state.borrow_mut();
            for (id, key) in state.keys.iter().enumerate() {
                let old = self.masks[id];
                let new = if filter.matches(key.as_ref()) { old & !bit } else { old | bit };
                if new != old {
                    self.masks[id] = new;
                    changes.push((id, old));
                }
            }
            state.filter = filter;
        }
        let active = self.propagate(&changes);
        log::debug!(
            "filter on dimension {} moved {} records, active set {:+}",
            dimension.id,
            changes.len(),
            active.net_count()
        );
        Ok(active)
    }

    /// Filters a dimension to a single key.
    pub fn filter_exact<K>(&mut self, dimension: &Dimension<K>, key: K) -> Result<DeltaBatch<RecordId>>
    where
        K: Ord + Clone + 'static,
    {
        self.filter(dimension, Filter::exact(key))
    }

    /// Filters a dimension to the half-open range `[low, high)`.
    pub fn filter_range<K>(&mut self, dimension: &Dimension<K>, low: K, high: K) -> Result<DeltaBatch<RecordId>>
    where
        K: Ord + Clone + 'static,
    {
        self.filter(dimension, Filter::range(low, high))
    }

    /// Removes the filter on one dimension.
    pub fn clear_filter<K>(&mut self, dimension: &Dimension<K>) -> Result<DeltaBatch<RecordId>>
    where
        K: Ord + Clone + 'static,
    {
        self.filter(dimension, Filter::All)
    }

    /// Removes the filters on every dimension.
    pub fn filter_all(&mut self) -> DeltaBatch<RecordId> {
        for dimension in &self.dimensions {
            dimension.borrow_mut().reset();
        }
        let mut changes = Vec::new();
        for (id, mask) in self.masks.iter_mut().enumerate() {
            if *mask != 0 {
                changes.push((id, *mask));
                *mask = 0;
            }
        }
        let active = self.propagate(&changes);
        log::debug!("cleared all filters, {} records re-entered", active.inserted());
        active
    }

    /// Returns the filter applied to a dimension, or None for a dimension
    /// of another crossfilter.
    pub fn current_filter<K>(&self, dimension: &Dimension<K>) -> Option<Filter<K>>
    where
        K: Ord + Clone + 'static,
    {
        if dimension.owner != self.id {
            return None;
        }
        Some(dimension.current_filter())
    }

    /// Returns true if the record passes every filter.
    #[inline]
    pub fn is_active(&self, id: RecordId) -> bool {
        self.masks.get(id).map_or(false, |&mask| mask == 0)
    }

    /// Number of records passing every filter.
    pub fn active_len(&self) -> usize {
        self.masks.iter().filter(|&&mask| mask == 0).count()
    }

    /// Returns the records passing every filter, in load order.
    pub fn all_filtered(&self) -> Vec<&T> {
        self.records
            .iter()
            .zip(&self.masks)
            .filter(|(_, mask)| **mask == 0)
            .map(|(record, _)| record)
            .collect()
    }

    /// Returns up to `n` active records with the smallest keys.
    ///
    /// Ties keep load order. Records without a key are never returned.
    pub fn bottom<K>(&self, dimension: &Dimension<K>, n: usize) -> Vec<&T>
    where
        K: Ord + Clone + 'static,
    {
        if dimension.owner != self.id {
            return Vec::new();
        }
        let state = dimension.state.borrow();
        self.take_active(&state.ascending, n)
    }

    /// Returns up to `n` active records with the largest keys.
    ///
    /// Ties keep load order. Records without a key are never returned.
    pub fn top<K>(&self, dimension: &Dimension<K>, n: usize) -> Vec<&T>
    where
        K: Ord + Clone + 'static,
    {
        if dimension.owner != self.id {
            return Vec::new();
        }
        let state = dimension.state.borrow();
        self.take_active(&state.descending, n)
    }

    /// Returns the smallest and largest key over the active set, or None
    /// when no active record has a key on this dimension.
    pub fn extent<K>(&self, dimension: &Dimension<K>) -> Option<(K, K)>
    where
        K: Ord + Clone + 'static,
    {
        if dimension.owner != self.id {
            return None;
        }
        let state = dimension.state.borrow();
        let low = state.ascending.iter().find(|&&id| self.masks[id] == 0)?;
        let high = state.descending.iter().find(|&&id| self.masks[id] == 0)?;
        Some((state.keys[*low].clone()?, state.keys[*high].clone()?))
    }

    fn take_active(&self, order: &[RecordId], n: usize) -> Vec<&T> {
        order
            .iter()
            .filter(|&&id| self.masks[id] == 0)
            .take(n)
            .map(|&id| &self.records[id])
            .collect()
    }

    fn check_owner<K>(&self, dimension: &Dimension<K>) -> Result<()> {
        if dimension.owner == self.id {
            Ok(())
        } else {
            Err(Error::invalid_operation(format!(
                "dimension {} belongs to another crossfilter",
                dimension.id
            )))
        }
    }

    fn register(&mut self, own: FilterMask, sink: Rc<RefCell<dyn GroupSink<T>>>) {
        self.groups.push(GroupSlot { own, sink });
    }

    /// Replays mask changes against every group.
    ///
    /// `changes` holds `(record, mask before)`; the current mask is the one
    /// after. A group sees a record when no dimension other than its own
    /// rejects it.
    fn propagate(&self, changes: &[(RecordId, FilterMask)]) -> DeltaBatch<RecordId> {
        for slot in &self.groups {
            let mut sink = slot.sink.borrow_mut();
            for &(id, old) in changes {
                let before = old & !slot.own == 0;
                let after = self.masks[id] & !slot.own == 0;
                if before != after {
                    let delta = if after { Delta::insert(id) } else { Delta::delete(id) };
                    sink.apply(&self.records[id], delta);
                }
            }
        }
        changes
            .iter()
            .filter_map(|&(id, old)| match (old == 0, self.masks[id] == 0) {
                (false, true) => Some(Delta::insert(id)),
                (true, false) => Some(Delta::delete(id)),
                _ => None,
            })
            .collect()
    }
}

/// Builder returned by `Crossfilter::group`.
///
/// The group key defaults to the dimension key; `by` maps it to a coarser
/// key. The group is registered when a reducer is chosen.
pub struct GroupBuilder<'a, T, G> {
    crossfilter: &'a mut Crossfilter<T>,
    dimension: DimensionId,
    keys: Vec<Option<G>>,
}

impl<'a, T: 'static, G: Ord + Clone + 'static> GroupBuilder<'a, T, G> {
    /// Maps the dimension key to the group key.
    pub fn by<H, F>(self, key_fn: F) -> GroupBuilder<'a, T, H>
    where
        F: Fn(&G) -> H,
    {
        GroupBuilder {
            crossfilter: self.crossfilter,
            dimension: self.dimension,
            keys: self.keys.iter().map(|key| key.as_ref().map(&key_fn)).collect(),
        }
    }

    /// Registers a record-count group.
    pub fn count(self) -> Group<G, u64> {
        self.reduce(Count)
    }

    /// Registers a group with a custom reducer.
    pub fn reduce<R>(self, reducer: R) -> Group<G, R::Acc>
    where
        R: Reducer<T> + 'static,
    {
        let own = dimension_bit(self.dimension);
        let cf = self.crossfilter;
        let mut buckets = BTreeMap::new();
        for (id, key) in self.keys.iter().enumerate() {
            let Some(key) = key else { continue };
            let acc = buckets.entry(key.clone()).or_insert_with(|| reducer.init());
            if cf.masks[id] & !own == 0 {
                reducer.add(acc, &cf.records[id]);
            }
        }
        let buckets = Rc::new(RefCell::new(buckets));
        let sink = KeyedSink::new(self.keys, reducer, Rc::clone(&buckets));
        cf.register(own, Rc::new(RefCell::new(sink)));
        log::debug!("registered group on dimension {}", self.dimension);
        Group::new(self.dimension, buckets)
    }

    /// Registers a group from add, remove and init closures.
    pub fn reduce_fn<A, Add, Remove, Init>(self, add: Add, remove: Remove, init: Init) -> Group<G, A>
    where
        A: Clone + 'static,
        Add: Fn(&mut A, &T) + 'static,
        Remove: Fn(&mut A, &T) + 'static,
        Init: Fn() -> A + 'static,
    {
        self.reduce(FnReducer::new(add, remove, init))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::Average;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        color: &'static str,
        size: u32,
        weight: Option<u64>,
    }

    fn item(color: &'static str, size: u32, weight: Option<u64>) -> Item {
        Item { color, size, weight }
    }

    fn fixture() -> Crossfilter<Item> {
        Crossfilter::new(vec![
            item("red", 3, Some(10)),
            item("blue", 1, Some(20)),
            item("red", 2, None),
            item("green", 3, Some(40)),
            item("blue", 5, Some(50)),
        ])
    }

    #[test]
    fn test_group_counts_in_key_order() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let counts = cf.group(&color).unwrap().count();
        assert_eq!(counts.all(), vec![("blue", 2), ("green", 1), ("red", 2)]);
    }

    #[test]
    fn test_filter_updates_other_groups_only() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let by_color = cf.group(&color).unwrap().count();
        let by_size = cf.group(&size).unwrap().count();

        cf.filter_exact(&color, "red").unwrap();

        // Own dimension unaffected.
        assert_eq!(by_color.all(), vec![("blue", 2), ("green", 1), ("red", 2)]);
        // Other dimension sees only red items, empty buckets stay.
        assert_eq!(by_size.all(), vec![(1, 0), (2, 1), (3, 1), (5, 0)]);
    }

    #[test]
    fn test_filter_replaces_previous_filter() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let all = cf.group_all(Count);

        cf.filter_exact(&color, "red").unwrap();
        assert_eq!(all.value(), 2);
        cf.filter_exact(&color, "blue").unwrap();
        assert_eq!(all.value(), 2);
        cf.filter(&color, Filter::in_set(["blue", "green"])).unwrap();
        assert_eq!(all.value(), 3);
    }

    #[test]
    fn test_filter_returns_active_set_changes() {
        let mut cf = fixture();
        let size = cf.dimension(|i: &Item| i.size).unwrap();

        let changes = cf.filter_range(&size, 2, 4).unwrap();
        assert_eq!(changes, vec![Delta::delete(1), Delta::delete(4)]);

        let changes = cf.clear_filter(&size).unwrap();
        assert_eq!(changes, vec![Delta::insert(1), Delta::insert(4)]);
    }

    #[test]
    fn test_group_all_respects_every_filter() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let total = cf.group_all(Count);

        cf.filter_exact(&color, "red").unwrap();
        cf.filter_exact(&size, 3).unwrap();
        assert_eq!(total.value(), 1);
        assert_eq!(cf.active_len(), 1);
        assert_eq!(cf.all_filtered(), vec![&item("red", 3, Some(10))]);

        cf.filter_all();
        assert_eq!(total.value(), 5);
        assert!(!color.has_filter());
        assert!(!size.has_filter());
    }

    #[test]
    fn test_group_by_maps_keys() {
        let mut cf = fixture();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let parity = cf.group(&size).unwrap().by(|s| s % 2 == 0).count();
        assert_eq!(parity.all(), vec![(false, 4), (true, 1)]);
    }

    #[test]
    fn test_average_group_with_missing_values() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let avg = cf
            .group(&color)
            .unwrap()
            .reduce(Average::new(|i: &Item| i.weight));

        assert_eq!(avg.get(&"red").map(|a| a.value()), Some(10.0));

        cf.filter_exact(&size, 2).unwrap();
        let red = avg.get(&"red").unwrap();
        assert_eq!((red.count, red.total), (0, 0));
        assert_eq!(red.value(), 0.0);
    }

    #[test]
    fn test_reduce_fn() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let size_sum = cf.group(&color).unwrap().reduce_fn(
            |acc: &mut u32, i: &Item| *acc += i.size,
            |acc: &mut u32, i: &Item| *acc -= i.size,
            || 0,
        );
        assert_eq!(size_sum.get(&"blue"), Some(6));

        cf.filter_range(&size, 0, 2).unwrap();
        assert_eq!(size_sum.get(&"blue"), Some(1));
    }

    #[test]
    fn test_top_bottom_stable() {
        let mut cf = fixture();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let color = cf.dimension(|i: &Item| i.color).unwrap();

        let bottom: Vec<u32> = cf.bottom(&size, 2).iter().map(|i| i.size).collect();
        assert_eq!(bottom, vec![1, 2]);

        let top: Vec<&str> = cf.top(&size, 3).iter().map(|i| i.color).collect();
        assert_eq!(top, vec!["blue", "red", "green"]);

        cf.filter_exact(&color, "red").unwrap();
        // Own filter applies to top/bottom.
        let top: Vec<u32> = cf.top(&size, 5).iter().map(|i| i.size).collect();
        assert_eq!(top, vec![3, 2]);
    }

    #[test]
    fn test_extent_and_empty_active_set() {
        let mut cf = fixture();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        assert_eq!(cf.extent(&size), Some((1, 5)));

        cf.filter_exact(&color, "purple").unwrap();
        assert_eq!(cf.active_len(), 0);
        assert_eq!(cf.extent(&size), None);
        assert!(cf.bottom(&size, 1).is_empty());
        assert!(cf.top(&size, 1).is_empty());
    }

    #[test]
    fn test_optional_dimension() {
        let mut cf = fixture();
        let weight = cf.dimension_opt(|i: &Item| i.weight).unwrap();
        assert_eq!(weight.keyed_len(), 4);
        assert_eq!(cf.extent(&weight), Some((10, 50)));

        let all = cf.group_all(Count);
        cf.filter(&weight, Filter::custom(|w: &u64| *w >= 20)).unwrap();
        // The record without a weight fails the filter.
        assert_eq!(all.value(), 3);
        assert!(!weight.passes(2));
    }

    #[test]
    fn test_foreign_dimension_rejected() {
        let mut a = fixture();
        let mut b = fixture();
        let color = a.dimension(|i: &Item| i.color).unwrap();
        let _ = b.dimension(|i: &Item| i.color).unwrap();

        assert!(b.filter_exact(&color, "red").is_err());
        assert!(b.group(&color).is_err());
        assert!(b.top(&color, 1).is_empty());
    }

    #[test]
    fn test_dimension_limit() {
        let mut cf = fixture();
        for _ in 0..MAX_DIMENSIONS {
            cf.dimension(|i: &Item| i.size).unwrap();
        }
        assert!(cf.dimension(|i: &Item| i.size).is_err());
    }

    #[test]
    fn test_distinct_keys() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        assert_eq!(color.distinct_keys(), vec!["blue", "green", "red"]);
        assert_eq!(color.key(3), Some("green"));
        assert_eq!(color.key(9), None);
    }

    #[test]
    fn test_current_filter() {
        let mut cf = fixture();
        let mut other = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        assert!(cf.current_filter(&color).unwrap().is_all());

        cf.filter_exact(&color, "red").unwrap();
        let current = cf.current_filter(&color).unwrap();
        assert!(current.matches(Some(&"red")));
        assert!(!current.matches(Some(&"blue")));
        assert!(other.current_filter(&color).is_none());

        cf.filter_all();
        assert!(cf.current_filter(&color).unwrap().is_all());
        let _ = other.filter_all();
    }

    #[test]
    fn test_handles_identify_dimension_and_records() {
        let mut cf = fixture();
        let color = cf.dimension(|i: &Item| i.color).unwrap();
        let size = cf.dimension(|i: &Item| i.size).unwrap();
        let by_size = cf.group(&size).unwrap().count();

        assert_eq!(color.id(), 0);
        assert_eq!(size.id(), 1);
        assert_eq!(by_size.dimension(), size.id());
        assert_eq!(cf.dimension_count(), 2);

        assert_eq!(cf.record(3), Some(&item("green", 3, Some(40))));
        assert_eq!(cf.record(5), None);
    }
}
