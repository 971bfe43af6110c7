//! Command implementations and argument parsing for the slotwise CLI.

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use slotwise_core::{
    Schedule, ScheduleError, Scheduler,
    deadlines::{TEXTBOOK_DEADLINES, seeded_deadlines},
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

/// Largest task count the `random` source will generate.
pub const MAX_RANDOM_TASKS: usize = 1_000_000;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "slotwise",
    about = "Schedule unit-time tasks into the latest free slot before their deadlines."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Schedule a deadline sequence and print the result.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Print the set membership table after every scheduling step.
    #[arg(long)]
    pub trace: bool,

    /// Where the deadlines come from.
    #[command(subcommand)]
    pub source: DeadlineSource,
}

/// Deadline sources supported by the `run` command.
#[derive(Debug, Subcommand, Clone)]
pub enum DeadlineSource {
    /// Use the ten-task textbook example.
    Textbook,
    /// Draw one deadline per task uniformly at random.
    Random(RandomArgs),
    /// Read whitespace-separated deadlines (starting at 1) from a file.
    File(FileArgs),
}

/// Random generation arguments.
#[derive(Debug, Args, Clone)]
pub struct RandomArgs {
    /// Number of tasks, at most 1000000. A missing, malformed, zero, or
    /// oversized count falls back to the textbook example.
    #[arg(long)]
    pub tasks: Option<String>,

    /// Seed for reproducible deadlines (drawn from entropy when omitted).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// File ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Path to a UTF-8 file of deadlines.
    pub path: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading deadlines.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A token in the deadline file was not a positive integer.
    #[error("`{path}` line {line}: `{token}` is not a deadline (expected an integer >= 1)")]
    InvalidDeadline {
        /// File containing the token.
        path: PathBuf,
        /// One-based line number of the token.
        line: usize,
        /// The rejected token.
        token: String,
    },
    /// Scheduling rejected the deadlines.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl CliError {
    /// Stable identifier for log fields; scheduling failures reuse the core code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::InvalidDeadline { .. } => "CLI_INVALID_DEADLINE",
            Self::Schedule(err) => err.code().as_str(),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Human-readable description of the deadline source.
    pub source: String,
    /// Zero-based deadlines that were scheduled, in task order.
    pub deadlines: Vec<usize>,
    /// Schedule produced by the core.
    pub schedule: Schedule,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading deadlines or scheduling fails.
///
/// # Examples
/// ```
/// # use slotwise_cli::cli::{Cli, Command, DeadlineSource, RunCommand, run_cli};
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         trace: false,
///         source: DeadlineSource::Textbook,
///     }),
/// };
/// let summary = run_cli(cli).expect("textbook run succeeds");
/// assert_eq!(summary.schedule.len(), 10);
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(source = field::Empty, trace = command.trace, tasks = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let (source, deadlines) = match command.source {
        DeadlineSource::Textbook => textbook_source(),
        DeadlineSource::Random(args) => random_source(&args),
        DeadlineSource::File(args) => {
            let deadlines = load_deadline_file(&args.path)?;
            (derive_source_name(&args.path), deadlines)
        }
    };
    span.record("source", field::display(&source));
    span.record("tasks", deadlines.len());

    let schedule = Scheduler::new()
        .with_snapshots(command.trace)
        .schedule(&deadlines)?;

    info!(
        source = source.as_str(),
        tasks = schedule.len(),
        on_time = schedule.on_time_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        source,
        deadlines,
        schedule,
    })
}

fn textbook_source() -> (String, Vec<usize>) {
    ("textbook".to_owned(), TEXTBOOK_DEADLINES.to_vec())
}

fn random_source(args: &RandomArgs) -> (String, Vec<usize>) {
    let raw = args.tasks.as_deref();
    let Some(tasks) = raw.and_then(parse_task_count) else {
        warn!(
            tasks = raw.unwrap_or("<missing>"),
            max_tasks = MAX_RANDOM_TASKS,
            "task count is not usable; using textbook deadlines"
        );
        return textbook_source();
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(tasks = tasks.get(), seed, "generating random deadlines");
    (
        format!("random (seed {seed})"),
        seeded_deadlines(tasks.get(), seed),
    )
}

/// Parses a task count leniently; `None` means "use the default set".
///
/// Counts above [`MAX_RANDOM_TASKS`] are rejected along with malformed ones.
pub(super) fn parse_task_count(raw: &str) -> Option<NonZeroUsize> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .ok()
        .filter(|tasks| tasks.get() <= MAX_RANDOM_TASKS)
}

/// Reads one-based deadlines from `path` and returns them zero-based.
#[instrument(name = "cli.load_deadline_file", err, fields(path = %path.display()))]
pub(super) fn load_deadline_file(path: &Path) -> Result<Vec<usize>, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deadlines(path, &contents)
}

pub(super) fn parse_deadlines(path: &Path, contents: &str) -> Result<Vec<usize>, CliError> {
    let mut deadlines = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        for token in line.split_whitespace() {
            let deadline = token
                .parse::<NonZeroUsize>()
                .map_err(|_| CliError::InvalidDeadline {
                    path: path.to_path_buf(),
                    line: index + 1,
                    token: token.to_owned(),
                })?;
            deadlines.push(deadline.get() - 1);
        }
    }
    Ok(deadlines)
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "deadlines".to_owned())
}

/// Renders `summary` to `writer` as one-based task and slot tables.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use slotwise_cli::cli::{ExecutionSummary, render_summary};
/// # use slotwise_core::Scheduler;
/// let summary = ExecutionSummary {
///     source: "demo".into(),
///     deadlines: vec![1, 0],
///     schedule: Scheduler::new().schedule(&[1, 0]).expect("valid deadlines"),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer).expect("writing to a Vec succeeds");
/// let text = String::from_utf8(buffer).expect("output is UTF-8");
/// assert!(text.contains("task 2 is scheduled in time slot 1"));
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let width = field_width(summary.deadlines.len());

    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "Description of task(s)")?;
    writeln!(writer, "----------------------")?;
    for (task, deadline) in summary.deadlines.iter().enumerate() {
        writeln!(
            writer,
            "task {:>width$} has deadline at time {:>width$}",
            task + 1,
            deadline + 1
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "Scheduling of task(s)")?;
    writeln!(writer, "---------------------")?;
    let snapshots = summary.schedule.snapshots();
    for (step, assignment) in summary.schedule.assignments().iter().enumerate() {
        writeln!(
            writer,
            "task {:>width$} is scheduled in time slot {:>width$}",
            assignment.task() + 1,
            assignment.slot() + 1
        )?;
        if let Some(representatives) = snapshots.get(step) {
            render_membership(representatives, width, &mut writer)?;
        }
    }

    writeln!(
        writer,
        "on time: {}/{}",
        summary.schedule.on_time_count(),
        summary.schedule.len()
    )?;
    Ok(())
}

fn render_membership(
    representatives: &[usize],
    width: usize,
    mut writer: impl Write,
) -> io::Result<()> {
    let header: Vec<String> = (1..=representatives.len())
        .map(|slot| format!("{slot:>width$}"))
        .collect();
    let rule: Vec<String> = representatives.iter().map(|_| "-".repeat(width)).collect();
    let values: Vec<String> = representatives
        .iter()
        .map(|slot| format!("{:>width$}", slot + 1))
        .collect();

    writeln!(writer, "time slot         |{}", header.join(" "))?;
    writeln!(writer, "------------------|{}", rule.join("-"))?;
    writeln!(writer, "repre. of its set |{}", values.join(" "))?;
    Ok(())
}

pub(super) fn field_width(tasks: usize) -> usize {
    tasks.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}
