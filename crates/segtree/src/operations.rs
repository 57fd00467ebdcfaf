use crate::algebra::LazyOperation;
use crate::monoids::Segment;

/// A pending assignment.
///
/// Every `T` is a meaningful value to assign, so "no pending assignment" gets
/// its own variant instead of a sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Assign<T> {
    #[default]
    Identity,
    Value(T),
}

impl<T> Assign<T> {
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// The most recent non-identity assignment wins.
    #[inline(always)]
    fn then(new: &Self, old: &Self) -> Self
    where
        T: Clone,
    {
        match new {
            Self::Identity => old.clone(),
            Self::Value(_) => new.clone(),
        }
    }
}

impl<T> From<T> for Assign<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

/// Adds a constant to every element; valid for `Min`/`Max` aggregates.
#[derive(Clone, Copy, Debug)]
pub enum Add {}

impl LazyOperation for Add {
    type Agg = i64;
    type Act = i64;

    #[inline(always)]
    fn act_unit() -> Self::Act {
        0
    }

    #[inline(always)]
    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        new + old
    }

    #[inline(always)]
    fn act_apply(act: &Self::Act, agg: &Self::Agg) -> Self::Agg {
        agg + act
    }
}

/// Adds a constant to every element of a size-aware sum.
#[derive(Clone, Copy, Debug)]
pub enum SegmentAdd {}

impl LazyOperation for SegmentAdd {
    type Agg = Segment;
    type Act = i64;

    #[inline(always)]
    fn act_unit() -> Self::Act {
        0
    }

    #[inline(always)]
    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        new + old
    }

    #[inline(always)]
    fn act_apply(act: &Self::Act, agg: &Self::Agg) -> Self::Agg {
        Segment::new(agg.value + act * agg.size as i64, agg.size)
    }
}

/// Overwrites every element; valid for `Min`/`Max` aggregates.
#[derive(Clone, Copy, Debug)]
pub enum Overwrite {}

impl LazyOperation for Overwrite {
    type Agg = i64;
    type Act = Assign<i64>;

    #[inline(always)]
    fn act_unit() -> Self::Act {
        Assign::Identity
    }

    #[inline(always)]
    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        Assign::then(new, old)
    }

    #[inline(always)]
    fn act_apply(act: &Self::Act, agg: &Self::Agg) -> Self::Agg {
        match act {
            Assign::Identity => *agg,
            Assign::Value(value) => *value,
        }
    }
}

/// Overwrites every element of a size-aware sum.
#[derive(Clone, Copy, Debug)]
pub enum SegmentOverwrite {}

impl LazyOperation for SegmentOverwrite {
    type Agg = Segment;
    type Act = Assign<i64>;

    #[inline(always)]
    fn act_unit() -> Self::Act {
        Assign::Identity
    }

    #[inline(always)]
    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        Assign::then(new, old)
    }

    #[inline(always)]
    fn act_apply(act: &Self::Act, agg: &Self::Agg) -> Self::Agg {
        match act {
            Assign::Identity => *agg,
            Assign::Value(value) => Segment::new(value * agg.size as i64, agg.size),
        }
    }
}
