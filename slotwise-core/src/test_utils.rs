//! Shared test utilities for `slotwise-core`.

use proptest::{collection::vec, prelude::Strategy};
use proptest::test_runner::Config as ProptestConfig;
use slotwise_test_support::ci::property_test_profile::ProptestRunProfile;

/// Largest task count generated by the property suites.
pub(crate) const MAX_PROPERTY_TASKS: usize = 96;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `SLOTWISE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Generates a non-empty deadline sequence whose values fit its own length.
pub(crate) fn deadline_sequence() -> impl Strategy<Value = Vec<usize>> {
    (1..=MAX_PROPERTY_TASKS).prop_flat_map(|tasks| vec(0..tasks, tasks))
}

/// Reference scheduler: scans left from the deadline, then wraps to the
/// latest free slot. Quadratic, used only to cross-check the forest.
pub(crate) fn naive_schedule(deadlines: &[usize]) -> Vec<usize> {
    let mut taken = vec![false; deadlines.len()];
    deadlines
        .iter()
        .map(|&deadline| {
            let slot = (0..=deadline)
                .rev()
                .chain((deadline + 1..deadlines.len()).rev())
                .find(|&slot| !taken[slot])
                .expect("a free slot remains for every task");
            taken[slot] = true;
            slot
        })
        .collect()
}
