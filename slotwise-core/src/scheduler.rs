//! Scheduling orchestration for the Slotwise library.
//!
//! Validates a deadline sequence once at the boundary and then drives a
//! [`SchedulingPass`] over it, one task per deadline.

use std::num::NonZeroUsize;

use tracing::{debug, info, instrument};

use crate::{Result, error::ScheduleError, pass::SchedulingPass, schedule::Schedule};

/// Entry point for scheduling a sequence of deadlines.
///
/// # Examples
/// ```
/// use slotwise_core::{Scheduler, deadlines::TEXTBOOK_DEADLINES};
///
/// let schedule = Scheduler::new()
///     .schedule(&TEXTBOOK_DEADLINES)
///     .expect("textbook deadlines are in range");
/// assert_eq!(schedule.slots(), vec![0, 6, 1, 9, 2, 5, 3, 8, 4, 7]);
/// assert_eq!(schedule.on_time_count(), 8);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scheduler {
    record_snapshots: bool,
}

impl Scheduler {
    /// Creates a scheduler that does not record per-step snapshots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the representative table after every step when `enabled`.
    ///
    /// # Examples
    /// ```
    /// use slotwise_core::Scheduler;
    ///
    /// let schedule = Scheduler::new()
    ///     .with_snapshots(true)
    ///     .schedule(&[1, 1])
    ///     .expect("deadlines are in range");
    /// assert_eq!(schedule.snapshots(), &[vec![0, 0], vec![0, 0]]);
    /// ```
    #[must_use]
    pub fn with_snapshots(mut self, enabled: bool) -> Self {
        self.record_snapshots = enabled;
        self
    }

    /// Returns whether snapshots are recorded.
    #[must_use]
    pub fn records_snapshots(&self) -> bool {
        self.record_snapshots
    }

    /// Schedules one task per deadline, in order, over `deadlines.len()` slots.
    ///
    /// Deadlines are zero-based slot indices. Each task gets the latest free
    /// slot not after its deadline; when none remains it gets the latest free
    /// slot overall.
    ///
    /// # Errors
    /// Returns [`ScheduleError::EmptyDeadlines`] for an empty sequence and
    /// [`ScheduleError::DeadlineOutOfRange`] when a deadline is not below the
    /// number of tasks.
    #[instrument(
        name = "core.schedule",
        err,
        skip(self, deadlines),
        fields(tasks = deadlines.len(), snapshots = self.record_snapshots),
    )]
    pub fn schedule(&self, deadlines: &[usize]) -> Result<Schedule> {
        let slots = validate(deadlines)?;
        let mut pass = SchedulingPass::new(slots);
        let mut schedule = Schedule::with_capacity(slots.get(), self.record_snapshots);

        for &deadline in deadlines {
            let assignment = pass.step(deadline);
            debug!(
                task = assignment.task(),
                deadline,
                slot = assignment.slot(),
                on_time = assignment.is_on_time(),
                "task scheduled"
            );
            schedule.push(assignment);
            if self.record_snapshots {
                schedule.push_snapshot(pass.forest_mut().representatives());
            }
        }

        info!(
            tasks = schedule.len(),
            on_time = schedule.on_time_count(),
            "schedule completed"
        );
        Ok(schedule)
    }
}

fn validate(deadlines: &[usize]) -> Result<NonZeroUsize> {
    let slots = NonZeroUsize::new(deadlines.len()).ok_or(ScheduleError::EmptyDeadlines)?;
    if let Some((task, &deadline)) = deadlines
        .iter()
        .enumerate()
        .find(|&(_, &deadline)| deadline >= slots.get())
    {
        return Err(ScheduleError::DeadlineOutOfRange {
            task,
            deadline,
            slots: slots.get(),
        });
    }
    Ok(slots)
}
