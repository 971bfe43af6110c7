//! Deterministic deadline workloads for benchmarks.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::params::DeadlineShape;

/// Builds `tasks` zero-based deadlines with the requested `shape`.
///
/// # Examples
/// ```
/// use slotwise_benches::{params::DeadlineShape, workload::deadlines};
///
/// assert_eq!(deadlines(DeadlineShape::BackLoaded, 3, 0), vec![2, 2, 2]);
/// ```
#[must_use]
pub fn deadlines(shape: DeadlineShape, tasks: usize, seed: u64) -> Vec<usize> {
    match shape {
        DeadlineShape::Uniform => {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..tasks).map(|_| rng.gen_range(0..tasks)).collect()
        }
        DeadlineShape::FrontLoaded => vec![0; tasks],
        DeadlineShape::BackLoaded => vec![tasks.saturating_sub(1); tasks],
    }
}
