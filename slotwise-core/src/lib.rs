//! Slotwise core library.
//!
//! Schedules unit-time tasks with deadlines onto the latest free time slot at
//! or before each deadline. Tasks are consumed in the order supplied, which the
//! caller is expected to have sorted by non-increasing penalty.
//!
//! The work is done by [`SlotForest`], a disjoint-set forest over slot indices
//! whose roots carry the single unconsumed slot of their set. Consuming a slot
//! folds its set into the set of the preceding slot, wrapping from slot `0` to
//! the last slot, so later lookups land on the next earlier free slot.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod deadlines;
mod error;
mod forest;
mod pass;
mod schedule;
mod scheduler;

pub use crate::{
    error::{Result, ScheduleError, ScheduleErrorCode},
    forest::{Slot, SlotForest},
    pass::SchedulingPass,
    schedule::{Assignment, Schedule},
    scheduler::Scheduler,
};

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod tests;
