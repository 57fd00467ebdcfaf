use std::ops::RangeBounds;

use log::debug;

use crate::algebra::{LazyOperation, Monoid};
use crate::error::{Result, check_index, expect_valid, normalize_range};

/// Segment tree with range actions applied lazily.
///
/// Same implicit layout as [`SegmentTree`](crate::SegmentTree), plus one
/// pending action per node. `data[i]` is the aggregate of node `i`'s subtree
/// *before* `lazy[i]` is applied, so the value a reader must use is
/// `act_apply(lazy[i], data[i])`. That value is only trustworthy once every
/// strict ancestor of `i` has been pushed, which is why queries take
/// `&mut self`.
pub struct LazySegmentTree<M, O>
where
    M: Monoid,
    O: LazyOperation<Agg = M::Agg>,
{
    len: usize,
    size: usize,
    log: u32,
    data: Vec<M::Agg>,
    lazy: Vec<O::Act>,
}

impl<M, O> Clone for LazySegmentTree<M, O>
where
    M: Monoid,
    O: LazyOperation<Agg = M::Agg>,
{
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            size: self.size,
            log: self.log,
            data: self.data.clone(),
            lazy: self.lazy.clone(),
        }
    }
}

impl<M, O> LazySegmentTree<M, O>
where
    M: Monoid,
    O: LazyOperation<Agg = M::Agg>,
{
    pub fn new(values: &[M::Agg]) -> Self {
        let len = values.len();
        let size = len.next_power_of_two();
        let log = size.trailing_zeros();
        let mut data = vec![M::agg_unit(); 2 * size];
        data[size..size + len].clone_from_slice(values);
        for i in (1..size).rev() {
            data[i] = M::agg_merge(&data[2 * i], &data[2 * i + 1]);
        }
        debug!("built lazy segment tree: len={len} size={size}");

        Self {
            len,
            size,
            log,
            data,
            lazy: vec![O::act_unit(); 2 * size],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    fn eval(&self, i: usize) -> M::Agg {
        O::act_apply(&self.lazy[i], &self.data[i])
    }

    /// Folds `lazy[i]` into `data[i]` and hands it to the children.
    fn push(&mut self, i: usize) {
        let act = std::mem::replace(&mut self.lazy[i], O::act_unit());
        self.data[i] = O::act_apply(&act, &self.data[i]);
        if i < self.size {
            self.lazy[2 * i] = O::act_compose(&act, &self.lazy[2 * i]);
            self.lazy[2 * i + 1] = O::act_compose(&act, &self.lazy[2 * i + 1]);
        }
    }

    /// Pushes every strict ancestor of `node`, root first.
    fn push_path(&mut self, node: usize) {
        for shift in (1..=self.log).rev() {
            self.push(node >> shift);
        }
    }

    /// Recomputes every strict ancestor of `node`, bottom up.
    fn pull_path(&mut self, mut node: usize) {
        while node > 1 {
            node >>= 1;
            self.data[node] = M::agg_merge(&self.eval(2 * node), &self.eval(2 * node + 1));
        }
    }

    #[track_caller]
    pub fn get(&mut self, index: usize) -> M::Agg {
        expect_valid(self.try_get(index))
    }

    pub fn try_get(&mut self, index: usize) -> Result<M::Agg> {
        check_index(index, self.len)?;
        let leaf = index + self.size;
        self.push_path(leaf);
        Ok(self.eval(leaf))
    }

    #[track_caller]
    pub fn set(&mut self, index: usize, value: M::Agg) {
        expect_valid(self.try_set(index, value));
    }

    pub fn try_set(&mut self, index: usize, value: M::Agg) -> Result<()> {
        check_index(index, self.len)?;
        let leaf = index + self.size;
        self.push_path(leaf);
        self.data[leaf] = value;
        self.lazy[leaf] = O::act_unit();
        self.pull_path(leaf);
        Ok(())
    }

    /// Applies `act` to the single position `index`.
    #[track_caller]
    pub fn apply_at(&mut self, index: usize, act: O::Act) {
        expect_valid(self.try_apply_at(index, act));
    }

    pub fn try_apply_at(&mut self, index: usize, act: O::Act) -> Result<()> {
        check_index(index, self.len)?;
        let leaf = index + self.size;
        self.push_path(leaf);
        self.lazy[leaf] = O::act_compose(&act, &self.lazy[leaf]);
        self.pull_path(leaf);
        Ok(())
    }

    /// Folds the half-open `range`; an empty range yields the unit.
    #[track_caller]
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> M::Agg {
        expect_valid(self.try_query(range))
    }

    pub fn try_query<R: RangeBounds<usize>>(&mut self, range: R) -> Result<M::Agg> {
        let (start, end) = normalize_range(range, self.len)?;
        if start == end {
            return Ok(M::agg_unit());
        }

        let mut l = start + self.size;
        let mut r = end + self.size;
        self.push_path(l);
        self.push_path(r - 1);

        let mut left = M::agg_unit();
        let mut right = M::agg_unit();
        while l < r {
            if (l & 1) == 1 {
                left = M::agg_merge(&left, &self.eval(l));
                l += 1;
            }
            if (r & 1) == 1 {
                r -= 1;
                right = M::agg_merge(&self.eval(r), &right);
            }
            l >>= 1;
            r >>= 1;
        }

        Ok(M::agg_merge(&left, &right))
    }

    pub fn all_query(&self) -> M::Agg {
        self.eval(1)
    }

    /// Applies `act` to every position in the half-open `range`.
    #[track_caller]
    pub fn apply<R: RangeBounds<usize>>(&mut self, range: R, act: O::Act) {
        expect_valid(self.try_apply(range, act));
    }

    pub fn try_apply<R: RangeBounds<usize>>(&mut self, range: R, act: O::Act) -> Result<()> {
        let (start, end) = normalize_range(range, self.len)?;
        if start == end {
            return Ok(());
        }

        let first = start + self.size;
        let last = end - 1 + self.size;
        self.push_path(first);
        self.push_path(last);

        let mut l = first;
        let mut r = last + 1;
        while l < r {
            if (l & 1) == 1 {
                self.lazy[l] = O::act_compose(&act, &self.lazy[l]);
                l += 1;
            }
            if (r & 1) == 1 {
                r -= 1;
                self.lazy[r] = O::act_compose(&act, &self.lazy[r]);
            }
            l >>= 1;
            r >>= 1;
        }

        self.pull_path(first);
        self.pull_path(last);
        Ok(())
    }

    /// Largest `r` such that `pred(query(l..r))` holds.
    ///
    /// `pred` must hold on the unit and be monotone in `r`.
    #[track_caller]
    pub fn max_right<F>(&mut self, l: usize, mut pred: F) -> usize
    where
        F: FnMut(&M::Agg) -> bool,
    {
        expect_valid(normalize_range(l..self.len, self.len));
        assert!(pred(&M::agg_unit()), "predicate must hold on the unit");
        if l == self.len {
            return self.len;
        }

        let mut l = l + self.size;
        self.push_path(l);
        let mut acc = M::agg_unit();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            let merged = M::agg_merge(&acc, &self.eval(l));
            if !pred(&merged) {
                while l < self.size {
                    self.push(l);
                    l *= 2;
                    let merged = M::agg_merge(&acc, &self.eval(l));
                    if pred(&merged) {
                        acc = merged;
                        l += 1;
                    }
                }
                return l - self.size;
            }
            acc = merged;
            l += 1;
            if l.is_power_of_two() {
                return self.len;
            }
        }
    }

    /// Smallest `l` such that `pred(query(l..r))` holds.
    ///
    /// `pred` must hold on the unit and be monotone in `l`.
    #[track_caller]
    pub fn min_left<F>(&mut self, r: usize, mut pred: F) -> usize
    where
        F: FnMut(&M::Agg) -> bool,
    {
        expect_valid(normalize_range(0..r, self.len));
        assert!(pred(&M::agg_unit()), "predicate must hold on the unit");
        if r == 0 {
            return 0;
        }

        let mut r = r + self.size;
        self.push_path(r - 1);
        let mut acc = M::agg_unit();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }
            let merged = M::agg_merge(&self.eval(r), &acc);
            if !pred(&merged) {
                while r < self.size {
                    self.push(r);
                    r = 2 * r + 1;
                    let merged = M::agg_merge(&self.eval(r), &acc);
                    if pred(&merged) {
                        acc = merged;
                        r -= 1;
                    }
                }
                return r + 1 - self.size;
            }
            acc = merged;
            if r.is_power_of_two() {
                return 0;
            }
        }
    }

    /// Materializes every position, pushing all pending actions to the leaves.
    pub fn to_vec(&mut self) -> Vec<M::Agg> {
        for i in 1..self.size {
            self.push(i);
        }
        (0..self.len).map(|i| self.eval(i + self.size)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LazySegmentTree;
    use crate::algebra::{LazyOperation, Monoid};
    use crate::error::SegtreeError;
    use crate::monoids::{Max, Min, Segment, SegmentSum};
    use crate::operations::{Add, Assign, Overwrite, SegmentAdd, SegmentOverwrite};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// `x -> a * x + b` over wrapping arithmetic; composition does not commute.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Affine {
        a: i64,
        b: i64,
    }

    impl Affine {
        fn apply_key(self, x: i64) -> i64 {
            self.a.wrapping_mul(x).wrapping_add(self.b)
        }
    }

    enum WrappingSum {}

    impl Monoid for WrappingSum {
        type Agg = Segment;

        fn agg_unit() -> Self::Agg {
            Segment::new(0, 0)
        }

        fn agg_merge(left: &Self::Agg, right: &Self::Agg) -> Self::Agg {
            Segment::new(left.value.wrapping_add(right.value), left.size + right.size)
        }
    }

    enum AffineSum {}

    impl LazyOperation for AffineSum {
        type Agg = Segment;
        type Act = Affine;

        fn act_unit() -> Self::Act {
            Affine { a: 1, b: 0 }
        }

        fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
            Affine {
                a: new.a.wrapping_mul(old.a),
                b: new.a.wrapping_mul(old.b).wrapping_add(new.b),
            }
        }

        fn act_apply(act: &Self::Act, agg: &Self::Agg) -> Self::Agg {
            let value = act
                .a
                .wrapping_mul(agg.value)
                .wrapping_add(act.b.wrapping_mul(agg.size as i64));
            Segment::new(value, agg.size)
        }
    }

    fn leaves(values: &[i64]) -> Vec<Segment> {
        values.iter().copied().map(Segment::leaf).collect()
    }

    #[test]
    fn add_then_add_sums_overlapping_ranges() {
        init_logger();
        let mut seg = LazySegmentTree::<SegmentSum, SegmentAdd>::new(&leaves(&[0; 6]));
        seg.apply(1..4, 5);
        seg.apply(2..6, 2);
        assert_eq!(seg.query(0..6).value, 23);
        assert_eq!(seg.to_vec(), leaves(&[0, 5, 7, 7, 2, 2]));
    }

    #[test]
    fn later_assignment_wins_under_min() {
        let mut seg = LazySegmentTree::<Min, Overwrite>::new(&[i64::MAX; 4]);
        seg.apply(0..4, Assign::Value(3));
        seg.apply(1..3, Assign::Value(1));
        assert_eq!(seg.query(0..4), 1);
        assert_eq!(seg.query(0..1), 3);
        assert_eq!(seg.query(3..4), 3);
        assert_eq!(seg.query(1..3), 1);
    }

    #[test]
    fn full_query_matches_direct_fold() {
        let values = [4, -2, 9, 0, 7, 7, -5];
        let mut seg = LazySegmentTree::<Max, Add>::new(&values);
        assert_eq!(seg.all_query(), 9);
        assert_eq!(seg.query(..), 9);

        let mut seg = LazySegmentTree::<SegmentSum, SegmentAdd>::new(&leaves(&values));
        assert_eq!(seg.query(..), Segment::new(20, 7));
    }

    #[test]
    fn repeated_query_is_stable() {
        let mut seg = LazySegmentTree::<SegmentSum, SegmentOverwrite>::new(&leaves(&[1; 11]));
        seg.apply(2..9, Assign::Value(4));
        seg.apply(5..7, Assign::Value(0));
        let first = seg.query(3..10);
        let second = seg.query(3..10);
        assert_eq!(first, second);
        assert_eq!(first, Segment::new(4 + 4 + 0 + 0 + 4 + 4 + 1, 7));
    }

    #[test]
    fn point_operations_see_pending_actions() {
        let mut seg = LazySegmentTree::<Min, Add>::new(&[3, 1, 4, 1, 5]);
        seg.apply(.., 10);
        assert_eq!(seg.get(2), 14);
        seg.set(2, 0);
        assert_eq!(seg.query(..), 0);
        seg.apply_at(2, 100);
        assert_eq!(seg.query(..), 11);
        assert_eq!(seg.get(2), 100);
        assert_eq!(seg.to_vec(), vec![13, 11, 100, 11, 15]);
    }

    #[test]
    fn empty_ranges_are_no_ops() {
        let mut seg = LazySegmentTree::<Max, Add>::new(&[]);
        assert!(seg.is_empty());
        assert_eq!(seg.query(..), i64::MIN);
        seg.apply(.., 1);

        let mut seg = LazySegmentTree::<Max, Add>::new(&[1, 2, 3]);
        seg.apply(1..1, 50);
        assert_eq!(seg.query(..), 3);
        assert_eq!(seg.query(2..2), i64::MIN);
    }

    #[test]
    fn checked_operations_report_violations() {
        let mut seg = LazySegmentTree::<Min, Add>::new(&[0; 5]);
        assert_eq!(
            seg.try_apply(2..6, 1),
            Err(SegtreeError::InvalidRange { start: 2, end: 6, len: 5 })
        );
        assert_eq!(
            seg.try_set(5, 1),
            Err(SegtreeError::IndexOutOfBounds { index: 5, len: 5 })
        );
        assert_eq!(
            seg.try_get(9),
            Err(SegtreeError::IndexOutOfBounds { index: 9, len: 5 })
        );
        assert_eq!(seg.try_query(0..5), Ok(0));
    }

    #[test]
    #[should_panic(expected = "invalid range 3..8 for length 6")]
    fn query_past_end_panics() {
        let mut seg = LazySegmentTree::<Min, Add>::new(&[0; 6]);
        seg.query(3..8);
    }

    #[test]
    #[should_panic(expected = "index 6 out of bounds for length 6")]
    fn set_past_end_panics() {
        let mut seg = LazySegmentTree::<Min, Add>::new(&[0; 6]);
        seg.set(6, 1);
    }

    #[test]
    fn random_affine_sum_matches_vec() {
        init_logger();
        let mut rng = StdRng::seed_from_u64(0xAFF1_2026);
        for n in 1..=64 {
            let mut values = (0..n)
                .map(|_| rng.random_range(-100_i64..=100))
                .collect::<Vec<_>>();
            let mut seg = LazySegmentTree::<WrappingSum, AffineSum>::new(&leaves(&values));

            for step in 0..300 {
                match rng.random_range(0..4) {
                    0 => {
                        let i = rng.random_range(0..n);
                        let x = rng.random_range(-100_i64..=100);
                        seg.set(i, Segment::leaf(x));
                        values[i] = x;
                    }
                    1 => {
                        let l = rng.random_range(0..=n);
                        let r = rng.random_range(l..=n);
                        let act = Affine {
                            a: rng.random_range(-3_i64..=3),
                            b: rng.random_range(-10_i64..=10),
                        };
                        seg.apply(l..r, act);
                        for x in &mut values[l..r] {
                            *x = act.apply_key(*x);
                        }
                    }
                    2 => {
                        let i = rng.random_range(0..n);
                        assert_eq!(seg.get(i), Segment::leaf(values[i]), "n={n} step={step}");
                    }
                    _ => {
                        let l = rng.random_range(0..=n);
                        let r = rng.random_range(l..=n);
                        let expected = values[l..r]
                            .iter()
                            .fold(0_i64, |acc, &x| acc.wrapping_add(x));
                        let got = seg.query(l..r);
                        assert_eq!(got, Segment::new(expected, r - l), "n={n} step={step}");
                    }
                }
            }
        }
    }

    #[test]
    fn random_assign_extremum_matches_vec() {
        let mut rng = StdRng::seed_from_u64(0xA551_67);
        for n in 1..=64 {
            let mut values = (0..n)
                .map(|_| rng.random_range(-1_000_i64..=1_000))
                .collect::<Vec<_>>();
            let mut min = LazySegmentTree::<Min, Overwrite>::new(&values);
            let mut max = LazySegmentTree::<Max, Overwrite>::new(&values);

            for _ in 0..300 {
                match rng.random_range(0..3) {
                    0 => {
                        let i = rng.random_range(0..n);
                        let x = rng.random_range(-1_000_i64..=1_000);
                        min.set(i, x);
                        max.set(i, x);
                        values[i] = x;
                    }
                    1 => {
                        let l = rng.random_range(0..=n);
                        let r = rng.random_range(l..=n);
                        let x = rng.random_range(-5_i64..=5);
                        min.apply(l..r, Assign::Value(x));
                        max.apply(l..r, Assign::Value(x));
                        values[l..r].fill(x);
                    }
                    _ => {
                        let l = rng.random_range(0..=n);
                        let r = rng.random_range(l..=n);
                        let slice = &values[l..r];
                        let lo = slice.iter().copied().min().unwrap_or(i64::MAX);
                        let hi = slice.iter().copied().max().unwrap_or(i64::MIN);
                        assert_eq!(min.query(l..r), lo, "n={n} l={l} r={r}");
                        assert_eq!(max.query(l..r), hi, "n={n} l={l} r={r}");
                    }
                }
            }
            assert_eq!(min.to_vec(), values);
        }
    }

    #[test]
    fn binary_searches_match_linear_scan() {
        let mut rng = StdRng::seed_from_u64(0x5EA_12C4);
        for n in 0..=40 {
            let mut values = vec![0_i64; n];
            let mut seg = LazySegmentTree::<SegmentSum, SegmentAdd>::new(&leaves(&values));

            for _ in 0..60 {
                if n > 0 {
                    let l = rng.random_range(0..n);
                    let r = rng.random_range(l + 1..=n);
                    let delta = rng.random_range(0_i64..=4);
                    seg.apply(l..r, delta);
                    for x in &mut values[l..r] {
                        *x += delta;
                    }
                }

                let limit = rng.random_range(0_i64..=80);
                let pred = |s: &Segment| s.value <= limit;

                let l = rng.random_range(0..=n);
                let mut expected = l;
                while expected < n && values[l..=expected].iter().sum::<i64>() <= limit {
                    expected += 1;
                }
                assert_eq!(seg.max_right(l, pred), expected, "n={n} l={l} limit={limit}");

                let r = rng.random_range(0..=n);
                let mut expected = r;
                while expected > 0 && values[expected - 1..r].iter().sum::<i64>() <= limit {
                    expected -= 1;
                }
                assert_eq!(seg.min_left(r, pred), expected, "n={n} r={r} limit={limit}");
            }
        }
    }
}
