//! Equity Incremental - Incremental dimension/group aggregation.
//!
//! This crate keeps grouped aggregates over a fixed in-memory record set
//! current while filters change. Instead of regrouping the whole set on
//! every selection, each filter change is turned into deltas (records
//! entering or leaving a visible set) that are replayed through the add and
//! remove halves of each group's reducer.
//!
//! # Core Concepts
//!
//! - `Crossfilter<T>`: The context owning the records and the filter state
//! - `Dimension<K>`: A keyed projection used for grouping, filtering and ordering
//! - `Group<G, A>` / `GroupAll<A>`: Keyed and global accumulators
//! - `Reducer<T>`: The add/remove/init triple; `remove` must undo `add`
//! - `Delta<T>`: A record entering (+1) or leaving (-1) a visible set
//!
//! A group never sees the filter of its own dimension, which is what lets a
//! selector keep listing every option while it filters the other views.
//!
//! # Built-in Reducers
//!
//! - `Count`: Record count
//! - `Sum`: Sum of an optional numeric field
//! - `Average`: Count and total with the zero-count reset policy
//! - `FnReducer`: Any add/remove/init closure triple
//!
//! # Example
//!
//! ```
//! use equity_incremental::{Average, Crossfilter};
//!
//! let mut cf = Crossfilter::new(vec![('A', 100u64), ('A', 300), ('B', 50)]);
//! let discipline = cf.dimension(|r: &(char, u64)| r.0).unwrap();
//! let salary = cf.dimension(|r: &(char, u64)| r.1).unwrap();
//! let avg = cf.group(&discipline).unwrap().reduce(Average::new(|r: &(char, u64)| Some(r.1)));
//!
//! assert_eq!(avg.get(&'A').unwrap().value(), 200.0);
//!
//! cf.filter_range(&salary, 0, 200).unwrap();
//! assert_eq!(avg.get(&'A').unwrap().value(), 100.0);
//! ```

#![no_std]

extern crate alloc;

pub mod crossfilter;
pub mod delta;
pub mod dimension;
pub mod filter;
pub mod group;
pub mod reduce;

pub use crossfilter::{Crossfilter, GroupBuilder};
pub use delta::{Delta, DeltaBatch, DeltaBatchExt};
pub use dimension::{Dimension, DimensionId, FilterMask, MAX_DIMENSIONS};
pub use filter::{Filter, KeyPredicateFn};
pub use group::{Group, GroupAll};
pub use reduce::{Average, AverageAcc, Count, FnReducer, Reducer, Sum};
