//! A single greedy scheduling pass over a [`SlotForest`].
//!
//! Each task looks up the free slot of the set that contains its deadline,
//! takes it, and then folds that slot's set into the set of the preceding
//! slot. Slot `0` precedes the last slot, so once the front of the timeline is
//! exhausted, early deadlines receive the latest slot still open.

use std::num::NonZeroUsize;

use crate::{forest::SlotForest, schedule::Assignment};

/// Mutable state of one scheduling pass.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use slotwise_core::SchedulingPass;
///
/// let mut pass = SchedulingPass::new(NonZeroUsize::new(3).expect("non-zero"));
/// assert_eq!(pass.step(1).slot(), 1);
/// assert_eq!(pass.step(1).slot(), 0);
/// assert_eq!(pass.step(1).slot(), 2);
/// assert!(pass.is_complete());
/// ```
#[derive(Clone, Debug)]
pub struct SchedulingPass {
    forest: SlotForest,
    assigned: usize,
}

impl SchedulingPass {
    /// Starts a pass over `slots` free slots.
    #[must_use]
    pub fn new(slots: NonZeroUsize) -> Self {
        Self {
            forest: SlotForest::new(slots),
            assigned: 0,
        }
    }

    /// Number of slots, which is also the number of tasks in the pass.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.forest.len()
    }

    /// Number of tasks that may still be scheduled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slot_count() - self.assigned
    }

    /// Returns `true` once every slot has been assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Read access to the underlying forest.
    #[must_use]
    pub fn forest(&self) -> &SlotForest {
        &self.forest
    }

    /// Mutable access to the forest for introspection such as
    /// [`SlotForest::representatives`].
    pub fn forest_mut(&mut self) -> &mut SlotForest {
        &mut self.forest
    }

    /// The slot whose set absorbs `slot` once `slot` is consumed.
    ///
    /// # Panics
    /// Panics when `slot` is outside the pass.
    #[must_use]
    pub fn predecessor(&self, slot: usize) -> usize {
        assert!(
            slot < self.slot_count(),
            "slot {slot} is outside a pass of {} slots",
            self.slot_count()
        );
        match slot {
            0 => self.slot_count() - 1,
            _ => slot - 1,
        }
    }

    /// Returns the slot a task with `deadline` would receive now.
    ///
    /// # Panics
    /// Panics when `deadline` is outside the pass.
    pub fn assign(&mut self, deadline: usize) -> usize {
        self.forest.available_slot(deadline)
    }

    /// Marks `slot` as used by merging its set into its predecessor's set.
    ///
    /// # Panics
    /// Panics when `slot` is outside the pass.
    pub fn consume(&mut self, slot: usize) {
        let predecessor = self.predecessor(slot);
        self.forest.unite(slot, predecessor);
    }

    /// Schedules the next task.
    ///
    /// The final task of the pass takes the last free slot without merging,
    /// since a single set remains.
    ///
    /// # Panics
    /// Panics when the pass is already complete or `deadline` is outside it.
    pub fn step(&mut self, deadline: usize) -> Assignment {
        assert!(
            !self.is_complete(),
            "all {} slots have already been assigned",
            self.slot_count()
        );
        let task = self.assigned;
        let slot = self.assign(deadline);
        self.assigned += 1;
        if !self.is_complete() {
            self.consume(slot);
        }
        Assignment::new(task, deadline, slot)
    }
}
