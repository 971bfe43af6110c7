//! Result types for scheduling passes.
//!
//! Provides the per-task [`Assignment`] and the ordered [`Schedule`] produced
//! by [`crate::Scheduler::schedule`].

/// The slot chosen for one task.
///
/// # Examples
/// ```
/// use slotwise_core::Assignment;
///
/// let assignment = Assignment::new(0, 3, 2);
/// assert!(assignment.is_on_time());
/// assert!(!Assignment::new(1, 0, 9).is_on_time());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Assignment {
    task: usize,
    deadline: usize,
    slot: usize,
}

impl Assignment {
    /// Creates an assignment of `task` (with `deadline`) to `slot`.
    #[must_use]
    pub const fn new(task: usize, deadline: usize, slot: usize) -> Self {
        Self {
            task,
            deadline,
            slot,
        }
    }

    /// Zero-based position of the task in the input sequence.
    #[must_use]
    pub const fn task(&self) -> usize {
        self.task
    }

    /// Zero-based deadline slot of the task.
    #[must_use]
    pub const fn deadline(&self) -> usize {
        self.deadline
    }

    /// Zero-based slot the task was scheduled in.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Whether the task runs no later than its deadline.
    #[must_use]
    pub const fn is_on_time(&self) -> bool {
        self.slot <= self.deadline
    }
}

/// Ordered outcome of a scheduling pass.
///
/// Assignments appear in input order. When snapshots were requested, entry
/// `k` of [`Self::snapshots`] holds the resolved available slot of every slot
/// after task `k` was placed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    assignments: Vec<Assignment>,
    snapshots: Vec<Vec<usize>>,
}

impl Schedule {
    pub(crate) fn with_capacity(tasks: usize, snapshots: bool) -> Self {
        Self {
            assignments: Vec::with_capacity(tasks),
            snapshots: if snapshots {
                Vec::with_capacity(tasks)
            } else {
                Vec::new()
            },
        }
    }

    pub(crate) fn push(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    pub(crate) fn push_snapshot(&mut self, representatives: Vec<usize>) {
        self.snapshots.push(representatives);
    }

    /// Assignments in input order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Assigned slot per task, in input order.
    #[must_use]
    pub fn slots(&self) -> Vec<usize> {
        self.assignments.iter().map(Assignment::slot).collect()
    }

    /// Number of scheduled tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` when no task was scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of tasks that meet their deadline.
    #[must_use]
    pub fn on_time_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_on_time()).count()
    }

    /// Tasks that received a slot after their deadline.
    #[must_use]
    pub fn late_tasks(&self) -> Vec<usize> {
        self.assignments
            .iter()
            .filter(|a| !a.is_on_time())
            .map(Assignment::task)
            .collect()
    }

    /// Per-step representative tables; empty unless snapshots were enabled.
    #[must_use]
    pub fn snapshots(&self) -> &[Vec<usize>] {
        &self.snapshots
    }
}
