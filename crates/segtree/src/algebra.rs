//! Algebraic policies driving the segment trees.
//!
//! Both traits are implemented by uninhabited marker types and dispatched
//! statically; a tree never holds a policy value.

/// An associative merge over `Agg` with a two-sided unit.
///
/// `agg_merge` is only ever called with `left` covering indices before
/// `right`, so the operation does not need to be commutative.
pub trait Monoid {
    type Agg: Clone;

    fn agg_unit() -> Self::Agg;
    fn agg_merge(left: &Self::Agg, right: &Self::Agg) -> Self::Agg;
}

/// A family of deferred updates acting on the aggregates of a [`Monoid`].
///
/// Implementations must satisfy, for every `f`, `g` and `x` the tree can hold:
///
/// - `act_apply(&act_unit(), x) == x`
/// - `act_apply(&act_compose(f, g), x) == act_apply(f, &act_apply(g, x))`
/// - `act_apply(f, merge(x, y)) == merge(act_apply(f, x), act_apply(f, y))`
///
/// The last law is why size-dependent actions (adding to a sum) need an
/// aggregate that carries its own length, see [`Segment`](crate::Segment).
pub trait LazyOperation {
    type Agg;
    type Act: Clone;

    fn act_unit() -> Self::Act;

    /// Compose actions as `new ∘ old` (apply `old` first, then `new`).
    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act;

    fn act_apply(act: &Self::Act, agg: &Self::Agg) -> Self::Agg;
}
