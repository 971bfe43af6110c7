//! `slotwise` binary.
//!
//! Installs the tracing subscriber, runs the requested schedule and prints
//! its tables. Any failure is logged once with its stable code and turns
//! into a non-zero exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use slotwise_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::error;

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        logging_unavailable(&err);
        return ExitCode::FAILURE;
    }

    match schedule_and_print() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, code = failure_code(&err), "slotwise run failed");
            ExitCode::FAILURE
        }
    }
}

fn schedule_and_print() -> Result<()> {
    let summary = run_cli(Cli::parse()).context("scheduling did not complete")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("could not write schedule tables")?;
    out.flush().context("could not flush stdout")
}

/// Code of the first [`CliError`] in the chain, or `"UNKNOWN"` for rendering
/// and other I/O failures.
fn failure_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map_or("UNKNOWN", CliError::code)
}

#[expect(
    clippy::print_stderr,
    reason = "no subscriber exists to carry this message"
)]
fn logging_unavailable(err: &LoggingError) {
    eprintln!("slotwise: logging setup failed: {err}");
}
