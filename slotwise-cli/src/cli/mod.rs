//! Command-line interface orchestration for slotwise.
//!
//! The CLI offers a single `run` command that takes deadlines from the
//! textbook example, a random generator, or a file, schedules them, and
//! renders the result as one-based tables.

mod commands;

pub use commands::{
    Cli, CliError, Command, DeadlineSource, ExecutionSummary, FileArgs, MAX_RANDOM_TASKS, RandomArgs,
    RunCommand, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
