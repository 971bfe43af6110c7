//! Support library for the slotwise CLI binary.
//!
//! Exposes the command and logging modules so doctests and integration tests
//! can drive the scheduler without spawning a subprocess.

pub mod cli;
pub mod logging;
