//! Deadline sequences for feeding the scheduler.
//!
//! Deadlines are zero-based slot indices in `[0, n)` for a run of `n` tasks.

#[cfg(feature = "random")]
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// The ten-task textbook example, zero-based.
pub const TEXTBOOK_DEADLINES: [usize; 10] = [0, 6, 1, 9, 2, 5, 3, 3, 6, 0];

/// Draws `tasks` deadlines uniformly from `[0, tasks)`.
///
/// # Examples
/// ```
/// use slotwise_core::deadlines::random_deadlines;
///
/// let deadlines = random_deadlines(8, &mut rand::thread_rng());
/// assert_eq!(deadlines.len(), 8);
/// assert!(deadlines.iter().all(|&d| d < 8));
/// ```
#[cfg(feature = "random")]
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
pub fn random_deadlines<R: Rng + ?Sized>(tasks: usize, rng: &mut R) -> Vec<usize> {
    (0..tasks).map(|_| rng.gen_range(0..tasks)).collect()
}

/// Deterministic variant of [`random_deadlines`] seeded with `seed`.
///
/// # Examples
/// ```
/// use slotwise_core::deadlines::seeded_deadlines;
///
/// assert_eq!(seeded_deadlines(16, 7), seeded_deadlines(16, 7));
/// ```
#[cfg(feature = "random")]
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
#[must_use]
pub fn seeded_deadlines(tasks: usize, seed: u64) -> Vec<usize> {
    let mut rng = SmallRng::seed_from_u64(seed);
    random_deadlines(tasks, &mut rng)
}
