use std::ops::RangeBounds;

use log::debug;

use crate::error::{Result, check_index, expect_valid, normalize_range};

/// Point-add, range-sum binary indexed tree over `i64`.
#[derive(Clone, Debug, Default)]
pub struct FenwickTree {
    tree: Vec<i64>,
}

impl FenwickTree {
    pub fn new(len: usize) -> Self {
        debug!("built fenwick tree: len={len}");
        Self {
            tree: vec![0; len],
        }
    }

    /// Builds in O(n) by pushing each partial sum to its parent once.
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = values.to_vec();
        for i in 1..=tree.len() {
            let parent = i + (i & i.wrapping_neg());
            if parent <= tree.len() {
                tree[parent - 1] += tree[i - 1];
            }
        }
        debug!("built fenwick tree: len={}", tree.len());
        Self { tree }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    #[track_caller]
    pub fn add(&mut self, index: usize, delta: i64) {
        expect_valid(self.try_add(index, delta));
    }

    pub fn try_add(&mut self, index: usize, delta: i64) -> Result<()> {
        check_index(index, self.len())?;
        let mut i = index + 1;
        while i <= self.tree.len() {
            self.tree[i - 1] += delta;
            i += i & i.wrapping_neg();
        }
        Ok(())
    }

    /// Sum of the first `end` positions.
    fn prefix_sum(&self, mut end: usize) -> i64 {
        let mut sum = 0;
        while end > 0 {
            sum += self.tree[end - 1];
            end &= end - 1;
        }
        sum
    }

    #[track_caller]
    pub fn sum<R: RangeBounds<usize>>(&self, range: R) -> i64 {
        expect_valid(self.try_sum(range))
    }

    pub fn try_sum<R: RangeBounds<usize>>(&self, range: R) -> Result<i64> {
        let (start, end) = normalize_range(range, self.len())?;
        Ok(self.prefix_sum(end) - self.prefix_sum(start))
    }
}

/// Number of pairs `i < j` with `values[i] > values[j]`.
pub fn inversion_number(values: &[usize]) -> u64 {
    let Some(&max) = values.iter().max() else {
        return 0;
    };
    let bound = max + 1;
    let mut seen = FenwickTree::new(bound);
    let mut inversions = 0_u64;
    for &x in values {
        inversions += seen.sum(x + 1..bound) as u64;
        seen.add(x, 1);
    }
    inversions
}
