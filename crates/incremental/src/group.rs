//! Groups: key → accumulator maps kept current by replaying deltas.

use crate::delta::Delta;
use crate::dimension::DimensionId;
use crate::reduce::Reducer;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::marker::PhantomData;
use equity_core::RecordId;

/// Receives visibility transitions from the crossfilter.
pub(crate) trait GroupSink<T> {
    fn apply(&mut self, record: &T, delta: Delta<RecordId>);
}

/// A grouped aggregate over one dimension.
///
/// Every key that appears anywhere in the record set has a bucket, including
/// keys whose records are all filtered out; their accumulator is the reducer's
/// zero. Buckets iterate in ascending key order.
pub struct Group<G, A> {
    dimension: DimensionId,
    buckets: Rc<RefCell<BTreeMap<G, A>>>,
}

impl<G, A> Clone for Group<G, A> {
    fn clone(&self) -> Self {
        Self {
            dimension: self.dimension,
            buckets: Rc::clone(&self.buckets),
        }
    }
}

impl<G: Ord + Clone, A: Clone> Group<G, A> {
    pub(crate) fn new(dimension: DimensionId, buckets: Rc<RefCell<BTreeMap<G, A>>>) -> Self {
        Self { dimension, buckets }
    }

    /// The dimension this group belongs to.
    #[inline]
    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    /// Returns every `(key, accumulator)` pair in ascending key order.
    pub fn all(&self) -> Vec<(G, A)> {
        self.buckets
            .borrow()
            .iter()
            .map(|(k, a)| (k.clone(), a.clone()))
            .collect()
    }

    /// Returns every `(key, value)` pair with the value derived from the
    /// accumulator.
    pub fn values<V, F>(&self, value: F) -> Vec<(G, V)>
    where
        F: Fn(&A) -> V,
    {
        self.buckets
            .borrow()
            .iter()
            .map(|(k, a)| (k.clone(), value(a)))
            .collect()
    }

    /// Returns the accumulator for a key.
    pub fn get(&self, key: &G) -> Option<A> {
        self.buckets.borrow().get(key).cloned()
    }

    /// Returns the keys in ascending order.
    pub fn keys(&self) -> Vec<G> {
        self.buckets.borrow().keys().cloned().collect()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.borrow().len()
    }

    /// Returns true if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.borrow().is_empty()
    }
}

pub(crate) struct KeyedSink<T, G, R: Reducer<T>> {
    keys: Vec<Option<G>>,
    reducer: R,
    buckets: Rc<RefCell<BTreeMap<G, R::Acc>>>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, G, R: Reducer<T>> KeyedSink<T, G, R> {
    pub(crate) fn new(keys: Vec<Option<G>>, reducer: R, buckets: Rc<RefCell<BTreeMap<G, R::Acc>>>) -> Self {
        Self {
            keys,
            reducer,
            buckets,
            _marker: PhantomData,
        }
    }
}

impl<T, G: Ord, R: Reducer<T>> GroupSink<T> for KeyedSink<T, G, R> {
    fn apply(&mut self, record: &T, delta: Delta<RecordId>) {
        let Some(key) = self.keys.get(delta.data).and_then(Option::as_ref) else {
            return;
        };
        let mut buckets = self.buckets.borrow_mut();
        if let Some(acc) = buckets.get_mut(key) {
            if delta.is_insert() {
                self.reducer.add(acc, record);
            } else {
                self.reducer.remove(acc, record);
            }
        }
    }
}

/// A single accumulator over every record that passes all filters.
pub struct GroupAll<A> {
    value: Rc<RefCell<A>>,
}

impl<A> Clone for GroupAll<A> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<A: Clone> GroupAll<A> {
    pub(crate) fn new(value: Rc<RefCell<A>>) -> Self {
        Self { value }
    }

    /// Returns the current accumulator.
    pub fn value(&self) -> A {
        self.value.borrow().clone()
    }
}

pub(crate) struct AllSink<T, R: Reducer<T>> {
    reducer: R,
    value: Rc<RefCell<R::Acc>>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, R: Reducer<T>> AllSink<T, R> {
    pub(crate) fn new(reducer: R, value: Rc<RefCell<R::Acc>>) -> Self {
        Self {
            reducer,
            value,
            _marker: PhantomData,
        }
    }
}

impl<T, R: Reducer<T>> GroupSink<T> for AllSink<T, R> {
    fn apply(&mut self, record: &T, delta: Delta<RecordId>) {
        let mut acc = self.value.borrow_mut();
        if delta.is_insert() {
            self.reducer.add(&mut *acc, record);
        } else {
            self.reducer.remove(&mut *acc, record);
        }
    }
}
