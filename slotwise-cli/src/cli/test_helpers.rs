//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary deadline files and assert error
//! handling. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, DeadlineSource, ExecutionSummary, RunCommand};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_deadline_file(
    dir: &TempDir,
    name: &str,
    contents: &str,
) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn run(source: DeadlineSource, trace: bool) -> Result<ExecutionSummary, CliError> {
    run_command(RunCommand { trace, source })
}

pub(super) fn run_expecting_error(source: DeadlineSource, panic_msg: &str) -> CliError {
    match run(source, false) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render_to_string(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = super::render_summary(summary, &mut buffer) {
        panic!("rendering into memory failed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output was not UTF-8: {err}"),
    }
}
