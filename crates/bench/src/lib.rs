use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x5EED_2026;

/// `(max size, sample size, warm-up ms, measure ms)`, checked in order.
const RUNTIME_TIERS: [(usize, usize, u64, u64); 3] = [
    (4_096, 15, 100, 200),
    (65_536, 15, 500, 1_000),
    (usize::MAX, 10, 800, 1_500),
];

#[derive(Clone, Copy, Debug)]
pub enum RangeOp {
    Apply { start: usize, end: usize, delta: i64 },
    Query { start: usize, end: usize },
}

pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    let &(_, samples, warm_up, measure) = RUNTIME_TIERS
        .iter()
        .find(|&&(max, ..)| size <= max)
        .unwrap_or(&RUNTIME_TIERS[RUNTIME_TIERS.len() - 1]);
    group.sample_size(samples);
    group.warm_up_time(Duration::from_millis(warm_up));
    group.measurement_time(Duration::from_millis(measure));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

pub fn random_values<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    range: std::ops::RangeInclusive<i64>,
) -> Vec<i64> {
    (0..n).map(|_| rng.random_range(range.clone())).collect()
}

/// A non-empty half-open range inside `0..n`; `n` must be positive.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, n: usize) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let end = rng.random_range((start + 1)..=n);
    (start, end)
}

/// `count` operations over `0..n`, of which roughly `apply_percent`% are range actions.
pub fn random_range_ops<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    count: usize,
    apply_percent: u32,
) -> Vec<RangeOp> {
    (0..count)
        .map(|_| {
            let (start, end) = random_range(rng, n);
            if rng.random_range(0..100) < apply_percent {
                RangeOp::Apply {
                    start,
                    end,
                    delta: rng.random_range(-1_000..=1_000),
                }
            } else {
                RangeOp::Query { start, end }
            }
        })
        .collect()
}
