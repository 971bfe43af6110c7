//! Crate-level scheduling tests and properties.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use proptest::{
    prop_assert, prop_assert_eq, proptest,
    test_runner::{TestCaseError, TestCaseResult},
};
use rstest::rstest;
use slotwise_test_support::tracing::RecordingLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use crate::{
    SchedulingPass, Scheduler,
    deadlines::TEXTBOOK_DEADLINES,
    test_utils::{deadline_sequence, naive_schedule, suite_proptest_config},
};

#[test]
fn textbook_deadlines_match_reference_schedule() {
    let schedule = Scheduler::new()
        .schedule(&TEXTBOOK_DEADLINES)
        .expect("textbook deadlines are in range");

    assert_eq!(schedule.slots(), vec![0, 6, 1, 9, 2, 5, 3, 8, 4, 7]);
    assert_eq!(schedule.late_tasks(), vec![7, 9]);
}

#[test]
fn textbook_snapshots_track_each_merge() {
    let schedule = Scheduler::new()
        .with_snapshots(true)
        .schedule(&TEXTBOOK_DEADLINES)
        .expect("textbook deadlines are in range");
    let snapshots = schedule.snapshots();

    assert_eq!(snapshots.len(), TEXTBOOK_DEADLINES.len());
    assert_eq!(snapshots[0], vec![9, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(snapshots[5], vec![8, 8, 8, 3, 4, 4, 4, 7, 8, 8]);
    assert_eq!(snapshots[7], vec![7, 7, 7, 7, 4, 4, 4, 7, 7, 7]);
    assert_eq!(snapshots[9], vec![7; 10]);
}

#[rstest]
#[case(vec![0, 0, 0, 0], vec![0, 3, 2, 1])]
#[case(vec![3, 3, 3, 3], vec![3, 2, 1, 0])]
#[case(vec![0, 1, 2, 3], vec![0, 1, 2, 3])]
#[case(vec![1, 0, 0, 2], vec![1, 0, 3, 2])]
fn wraps_to_highest_open_slot(#[case] deadlines: Vec<usize>, #[case] expected: Vec<usize>) {
    let schedule = Scheduler::new()
        .schedule(&deadlines)
        .expect("deadlines are in range");
    assert_eq!(schedule.slots(), expected);
}

#[test]
fn large_passes_complete_without_deep_recursion() {
    let tasks = 200_000;
    let deadlines: Vec<usize> = (0..tasks).map(|task| (task * 7_919) % tasks).collect();
    let schedule = Scheduler::new()
        .schedule(&deadlines)
        .expect("deadlines are in range");

    assert_eq!(schedule.len(), tasks);
    let distinct: BTreeSet<usize> = schedule.slots().into_iter().collect();
    assert_eq!(distinct.len(), tasks);
}

#[test]
fn schedule_emits_span_and_completion_event() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        Scheduler::new()
            .schedule(&[1, 0])
            .expect("deadlines are in range");
    });

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "core.schedule")
        .expect("core.schedule span must be recorded");
    assert_eq!(span.fields.get("tasks").map(String::as_str), Some("2"));
    assert_eq!(span.fields.get("snapshots").map(String::as_str), Some("false"));

    let completed = layer
        .events()
        .into_iter()
        .find(|event| {
            event.level == Level::INFO
                && event.fields.get("message").map(String::as_str) == Some("schedule completed")
        })
        .expect("completion event must be recorded");
    assert_eq!(completed.fields.get("on_time").map(String::as_str), Some("2"));
}

fn check_partition_invariants(deadlines: &[usize]) -> TestCaseResult {
    let slots = NonZeroUsize::new(deadlines.len())
        .ok_or_else(|| TestCaseError::fail("strategy produced no deadlines"))?;
    let mut pass = SchedulingPass::new(slots);
    let mut consumed = BTreeSet::new();

    for (step, &deadline) in deadlines.iter().enumerate() {
        let assignment = pass.step(deadline);
        prop_assert!(
            consumed.insert(assignment.slot()),
            "slot {} assigned twice",
            assignment.slot()
        );

        // The final step leaves the last set in place.
        let open = if pass.is_complete() {
            1
        } else {
            slots.get() - (step + 1)
        };
        prop_assert_eq!(pass.forest().set_count(), open);

        if !pass.is_complete() {
            let available: BTreeSet<usize> =
                pass.forest_mut().representatives().into_iter().collect();
            prop_assert_eq!(available.len(), open);
            prop_assert!(available.is_disjoint(&consumed));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn output_is_a_permutation_of_slots(deadlines in deadline_sequence()) {
        let schedule = Scheduler::new()
            .schedule(&deadlines)
            .expect("strategy only yields valid deadlines");
        prop_assert_eq!(schedule.len(), deadlines.len());

        let mut slots = schedule.slots();
        slots.sort_unstable();
        prop_assert_eq!(slots, (0..deadlines.len()).collect::<Vec<_>>());
    }

    #[test]
    fn matches_latest_free_slot_reference(deadlines in deadline_sequence()) {
        let schedule = Scheduler::new()
            .schedule(&deadlines)
            .expect("strategy only yields valid deadlines");
        prop_assert_eq!(schedule.slots(), naive_schedule(&deadlines));
    }

    #[test]
    fn late_tasks_only_when_no_earlier_slot_was_free(deadlines in deadline_sequence()) {
        let schedule = Scheduler::new()
            .schedule(&deadlines)
            .expect("strategy only yields valid deadlines");
        let mut taken = vec![false; deadlines.len()];
        for assignment in schedule.assignments() {
            if !assignment.is_on_time() {
                prop_assert!(taken[..=assignment.deadline()].iter().all(|&t| t));
            }
            taken[assignment.slot()] = true;
        }
    }

    #[test]
    fn sets_track_unconsumed_slots(deadlines in deadline_sequence()) {
        check_partition_invariants(&deadlines)?;
    }

    #[test]
    fn repeated_find_preserves_roots_and_slots(
        deadlines in deadline_sequence(),
        probe in 0usize..crate::test_utils::MAX_PROPERTY_TASKS,
    ) {
        let slots = NonZeroUsize::new(deadlines.len()).expect("strategy yields tasks");
        let mut pass = SchedulingPass::new(slots);
        for &deadline in deadlines.iter().take(deadlines.len() / 2) {
            pass.step(deadline);
        }
        let probe = probe % deadlines.len();
        let forest = pass.forest_mut();
        let before = forest.representatives();

        let first = forest.find(probe);
        let second = forest.find(probe);

        prop_assert_eq!(first, second);
        prop_assert_eq!(forest.representatives(), before);
    }
}
