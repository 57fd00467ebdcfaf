//! Segment trees over user-supplied monoids, with optional lazy range actions.
//!
//! - Ranges are half-open and accept any `RangeBounds<usize>`.
//! - Index and range violations panic; every such operation has a `try_*`
//!   twin returning [`SegtreeError`] instead.
//! - Trees are single-owner values: lazy queries mutate pending state, so
//!   shared use needs external synchronization.

pub mod algebra;
pub mod catalog;
pub mod monoids;
pub mod operations;

mod error;
mod fenwick;
mod lazy_segment_tree;
mod segment_tree;

pub use algebra::{LazyOperation, Monoid};
pub use catalog::{
    Preset, PresetTree, RangeAddRangeMax, RangeAddRangeMin, RangeAddRangeSum, RangeAssignRangeMax,
    RangeAssignRangeMin, RangeAssignRangeSum,
};
pub use error::{Result, SegtreeError};
pub use fenwick::{FenwickTree, inversion_number};
pub use lazy_segment_tree::LazySegmentTree;
pub use monoids::{Max, Min, Segment, SegmentSum, Sum};
pub use operations::{Add, Assign, Overwrite, SegmentAdd, SegmentOverwrite};
pub use segment_tree::SegmentTree;
