use std::ops::RangeBounds;

use log::debug;

use crate::algebra::Monoid;
use crate::error::{Result, check_index, expect_valid, normalize_range};

/// Point-update, range-fold segment tree.
///
/// Nodes live in one buffer: the root is `1`, node `i` has children `2i` and
/// `2i + 1`, and the leaves start at `size`, the smallest power of two that
/// is at least `len`. Leaves past `len` hold `M::agg_unit()`.
pub struct SegmentTree<M: Monoid> {
    len: usize,
    size: usize,
    tree: Vec<M::Agg>,
}

impl<M: Monoid> Clone for SegmentTree<M> {
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            size: self.size,
            tree: self.tree.clone(),
        }
    }
}

impl<M: Monoid> SegmentTree<M> {
    pub fn new(values: &[M::Agg]) -> Self {
        let len = values.len();
        let size = len.next_power_of_two();
        let mut tree = vec![M::agg_unit(); 2 * size];
        tree[size..size + len].clone_from_slice(values);
        for i in (1..size).rev() {
            tree[i] = M::agg_merge(&tree[2 * i], &tree[2 * i + 1]);
        }
        debug!("built segment tree: len={len} size={size}");

        Self { len, size, tree }
    }

    /// A tree of `len` positions, all holding the unit.
    pub fn with_len(len: usize) -> Self {
        Self::new(&vec![M::agg_unit(); len])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> &M::Agg {
        expect_valid(check_index(index, self.len));
        &self.tree[index + self.size]
    }

    #[track_caller]
    pub fn set(&mut self, index: usize, value: M::Agg) {
        expect_valid(self.try_set(index, value));
    }

    pub fn try_set(&mut self, index: usize, value: M::Agg) -> Result<()> {
        check_index(index, self.len)?;
        let mut i = index + self.size;
        self.tree[i] = value;
        while i > 1 {
            i >>= 1;
            self.tree[i] = M::agg_merge(&self.tree[2 * i], &self.tree[2 * i + 1]);
        }
        Ok(())
    }

    /// Folds the half-open `range`; an empty range yields the unit.
    #[track_caller]
    pub fn query<R: RangeBounds<usize>>(&self, range: R) -> M::Agg {
        expect_valid(self.try_query(range))
    }

    pub fn try_query<R: RangeBounds<usize>>(&self, range: R) -> Result<M::Agg> {
        let (start, end) = normalize_range(range, self.len)?;

        let mut l = start + self.size;
        let mut r = end + self.size;
        let mut left = M::agg_unit();
        let mut right = M::agg_unit();

        while l < r {
            if (l & 1) == 1 {
                left = M::agg_merge(&left, &self.tree[l]);
                l += 1;
            }
            if (r & 1) == 1 {
                r -= 1;
                right = M::agg_merge(&self.tree[r], &right);
            }
            l >>= 1;
            r >>= 1;
        }

        Ok(M::agg_merge(&left, &right))
    }

    pub fn all_query(&self) -> M::Agg {
        self.tree[1].clone()
    }

    /// Largest `r` such that `pred(query(l..r))` holds.
    ///
    /// `pred` must hold on the unit and be monotone: once it fails for some
    /// `r` it fails for every larger one.
    #[track_caller]
    pub fn max_right<F>(&self, l: usize, mut pred: F) -> usize
    where
        F: FnMut(&M::Agg) -> bool,
    {
        expect_valid(normalize_range(l..self.len, self.len));
        assert!(pred(&M::agg_unit()), "predicate must hold on the unit");
        if l == self.len {
            return self.len;
        }

        let mut l = l + self.size;
        let mut acc = M::agg_unit();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            let merged = M::agg_merge(&acc, &self.tree[l]);
            if !pred(&merged) {
                while l < self.size {
                    l *= 2;
                    let merged = M::agg_merge(&acc, &self.tree[l]);
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
    /// Same contract on `pred` as [`max_right`](Self::max_right), mirrored.
    #[track_caller]
    pub fn min_left<F>(&self, r: usize, mut pred: F) -> usize
    where
        F: FnMut(&M::Agg) -> bool,
    {
        expect_valid(normalize_range(0..r, self.len));
        assert!(pred(&M::agg_unit()), "predicate must hold on the unit");
        if r == 0 {
            return 0;
        }

        let mut r = r + self.size;
        let mut acc = M::agg_unit();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }
            let merged = M::agg_merge(&self.tree[r], &acc);
            if !pred(&merged) {
                while r < self.size {
                    r = 2 * r + 1;
                    let merged = M::agg_merge(&self.tree[r], &acc);
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
}
