use crate::algebra::Monoid;

/// Aggregate of a contiguous run of `i64`s together with its length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    pub value: i64,
    pub size: usize,
}

impl Segment {
    pub const fn new(value: i64, size: usize) -> Self {
        Self { value, size }
    }

    /// A single position holding `value`.
    pub const fn leaf(value: i64) -> Self {
        Self::new(value, 1)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Min {}

impl Monoid for Min {
    type Agg = i64;

    #[inline(always)]
    fn agg_unit() -> Self::Agg {
        i64::MAX
    }

    #[inline(always)]
    fn agg_merge(left: &Self::Agg, right: &Self::Agg) -> Self::Agg {
        *left.min(right)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Max {}

impl Monoid for Max {
    type Agg = i64;

    #[inline(always)]
    fn agg_unit() -> Self::Agg {
        i64::MIN
    }

    #[inline(always)]
    fn agg_merge(left: &Self::Agg, right: &Self::Agg) -> Self::Agg {
        *left.max(right)
    }
}

/// Plain `i64` sum. Enough for point updates; range actions need [`SegmentSum`].
#[derive(Clone, Copy, Debug)]
pub enum Sum {}

impl Monoid for Sum {
    type Agg = i64;

    #[inline(always)]
    fn agg_unit() -> Self::Agg {
        0
    }

    #[inline(always)]
    fn agg_merge(left: &Self::Agg, right: &Self::Agg) -> Self::Agg {
        left + right
    }
}

/// Sum that also tracks how many positions it covers.
#[derive(Clone, Copy, Debug)]
pub enum SegmentSum {}

impl Monoid for SegmentSum {
    type Agg = Segment;

    #[inline(always)]
    fn agg_unit() -> Self::Agg {
        Segment::new(0, 0)
    }

    #[inline(always)]
    fn agg_merge(left: &Self::Agg, right: &Self::Agg) -> Self::Agg {
        Segment::new(left.value + right.value, left.size + right.size)
    }
}
