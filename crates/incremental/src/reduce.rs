//! Reducers: the add/remove/init triple behind every group.
//!
//! A reducer folds records into an accumulator one at a time. Groups call
//! `add` when a record becomes visible and `remove` when it stops being
//! visible, so `remove` must exactly undo `add`: replaying any sequence of
//! adds followed by the same removes returns the accumulator to where it
//! started.

use core::marker::PhantomData;

/// The add/remove/init triple of an incremental aggregate.
pub trait Reducer<T> {
    /// Per-key accumulator state.
    type Acc: Clone;

    /// Produces the zero accumulator.
    fn init(&self) -> Self::Acc;

    /// Folds a record entering the visible set.
    fn add(&self, acc: &mut Self::Acc, record: &T);

    /// Unfolds a record leaving the visible set.
    fn remove(&self, acc: &mut Self::Acc, record: &T);
}

/// Counts records.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<T> Reducer<T> for Count {
    type Acc = u64;

    #[inline]
    fn init(&self) -> u64 {
        0
    }

    #[inline]
    fn add(&self, acc: &mut u64, _record: &T) {
        *acc += 1;
    }

    #[inline]
    fn remove(&self, acc: &mut u64, _record: &T) {
        *acc = acc.saturating_sub(1);
    }
}

/// Sums a numeric field. Records where the field is absent are skipped.
pub struct Sum<F> {
    field: F,
}

impl<F> Sum<F> {
    /// Creates a sum over the given field accessor.
    pub fn new(field: F) -> Self {
        Self { field }
    }
}

impl<T, F> Reducer<T> for Sum<F>
where
    F: Fn(&T) -> Option<u64>,
{
    type Acc = u64;

    fn init(&self) -> u64 {
        0
    }

    fn add(&self, acc: &mut u64, record: &T) {
        if let Some(v) = (self.field)(record) {
            *acc += v;
        }
    }

    fn remove(&self, acc: &mut u64, record: &T) {
        if let Some(v) = (self.field)(record) {
            *acc = acc.saturating_sub(v);
        }
    }
}

/// Running count and total of a numeric field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AverageAcc {
    pub count: u64,
    pub total: u64,
}

impl AverageAcc {
    /// Returns total/count, or 0 when the count is zero.
    pub fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }
}

/// Average of a numeric field.
///
/// Records where the field is absent contribute to neither count nor total.
/// When a removal brings the count to zero the total is reset to zero, so an
/// empty bucket always reports `{0, 0}`.
pub struct Average<F> {
    field: F,
}

impl<F> Average<F> {
    /// Creates an average over the given field accessor.
    pub fn new(field: F) -> Self {
        Self { field }
    }
}

impl<T, F> Reducer<T> for Average<F>
where
    F: Fn(&T) -> Option<u64>,
{
    type Acc = AverageAcc;

    fn init(&self) -> AverageAcc {
        AverageAcc::default()
    }

    fn add(&self, acc: &mut AverageAcc, record: &T) {
        if let Some(v) = (self.field)(record) {
            acc.count += 1;
            acc.total += v;
        }
    }

    fn remove(&self, acc: &mut AverageAcc, record: &T) {
        if let Some(v) = (self.field)(record) {
            acc.count = acc.count.saturating_sub(1);
            if acc.count == 0 {
                acc.total = 0;
            } else {
                acc.total = acc.total.saturating_sub(v);
            }
        }
    }
}

/// A reducer assembled from three closures.
///
/// This is the closure form of `group.reduce(add, remove, init)`.
pub struct FnReducer<T, A, Add, Remove, Init> {
    add: Add,
    remove: Remove,
    init: Init,
    _marker: PhantomData<fn(&T) -> A>,
}

impl<T, A, Add, Remove, Init> FnReducer<T, A, Add, Remove, Init>
where
    Add: Fn(&mut A, &T),
    Remove: Fn(&mut A, &T),
    Init: Fn() -> A,
{
    /// Creates a reducer from add, remove and init closures.
    pub fn new(add: Add, remove: Remove, init: Init) -> Self {
        Self {
            add,
            remove,
            init,
            _marker: PhantomData,
        }
    }
}

impl<T, A, Add, Remove, Init> Reducer<T> for FnReducer<T, A, Add, Remove, Init>
where
    A: Clone,
    Add: Fn(&mut A, &T),
    Remove: Fn(&mut A, &T),
    Init: Fn() -> A,
{
    type Acc = A;

    fn init(&self) -> A {
        (self.init)()
    }

    fn add(&self, acc: &mut A, record: &T) {
        (self.add)(acc, record)
    }

    fn remove(&self, acc: &mut A, record: &T) {
        (self.remove)(acc, record)
    }
}
