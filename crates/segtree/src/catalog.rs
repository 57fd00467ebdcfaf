//! Ready-made pairings of a [`Monoid`] with a compatible [`LazyOperation`].
//!
//! Each preset also fixes how a raw `i64` becomes a leaf, which is where
//! mismatches usually creep in: the sum presets must seed leaves with a size
//! of one or every range action is scaled wrong.

use crate::algebra::{LazyOperation, Monoid};
use crate::lazy_segment_tree::LazySegmentTree;
use crate::monoids::{Max, Min, Segment, SegmentSum};
use crate::operations::{Add, Overwrite, SegmentAdd, SegmentOverwrite};

pub type PresetTree<P> = LazySegmentTree<<P as Preset>::Monoid, <P as Preset>::Operation>;

pub trait Preset: Sized {
    type Monoid: Monoid;
    type Operation: LazyOperation<Agg = <Self::Monoid as Monoid>::Agg>;

    fn seed(value: i64) -> <Self::Monoid as Monoid>::Agg;

    fn from_values(values: &[i64]) -> PresetTree<Self> {
        let leaves = values.iter().map(|&x| Self::seed(x)).collect::<Vec<_>>();
        LazySegmentTree::new(&leaves)
    }

    /// `len` positions, all zero.
    fn with_len(len: usize) -> PresetTree<Self> {
        Self::from_values(&vec![0; len])
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAddRangeMin {}

impl Preset for RangeAddRangeMin {
    type Monoid = Min;
    type Operation = Add;

    fn seed(value: i64) -> i64 {
        value
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAddRangeMax {}

impl Preset for RangeAddRangeMax {
    type Monoid = Max;
    type Operation = Add;

    fn seed(value: i64) -> i64 {
        value
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAddRangeSum {}

impl Preset for RangeAddRangeSum {
    type Monoid = SegmentSum;
    type Operation = SegmentAdd;

    fn seed(value: i64) -> Segment {
        Segment::leaf(value)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAssignRangeMin {}

impl Preset for RangeAssignRangeMin {
    type Monoid = Min;
    type Operation = Overwrite;

    fn seed(value: i64) -> i64 {
        value
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAssignRangeMax {}

impl Preset for RangeAssignRangeMax {
    type Monoid = Max;
    type Operation = Overwrite;

    fn seed(value: i64) -> i64 {
        value
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAssignRangeSum {}

impl Preset for RangeAssignRangeSum {
    type Monoid = SegmentSum;
    type Operation = SegmentOverwrite;

    fn seed(value: i64) -> Segment {
        Segment::leaf(value)
    }
}
