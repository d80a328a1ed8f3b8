//! # Reporting
//!
//! The runner narrates a run through the [`Report`] trait. [`TextReporter`]
//! is the stock implementation: a line-oriented stream with fixture
//! delimiters, per-test `RUN` / `PASSED` / `FAILED` lines, annotation lines
//! for every failed check, trace, and caught panic, and a closing summary.
//!
//! ```text
//! [--------------]
//! [ RUN          ] adds
//! [       PASSED ] adds
//! [ RUN          ] subtracts
//! [              ]    assert #1 at tests/math.rs:42
//! [       FAILED ] subtracts
//! [--------------]
//!
//! [==============]
//! [ TEST RESULTS ]
//! [==============]
//! [    PASSED    ]    1 tests
//! [    FAILED    ]    1 tests
//! [==============]
//! ```
//!
//! ## I/O errors
//!
//! A broken output stream never stops a run. The first write error is
//! logged and kept, every later write is skipped, and the error surfaces
//! from [`Report::finish`].

// ------------------------------------------------------------------------------------------------
// Unit tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests;

// ------------------------------------------------------------------------------------------------
// Includes
// ------------------------------------------------------------------------------------------------

use std::{
    fmt,
    io::{self, Write},
    panic::Location,
};

use thiserror::Error;
use tracing::warn;

use crate::recorder::Verdict;
use crate::runner::RunSummary;

// ------------------------------------------------------------------------------------------------
// Constants
// ------------------------------------------------------------------------------------------------

const FIXTURE_RULE: &str = "[--------------]";
const SUMMARY_RULE: &str = "[==============]";
const ANNOTATION: &str = "[              ]    ";

// ------------------------------------------------------------------------------------------------
// Error Types
// ------------------------------------------------------------------------------------------------

/// Errors surfaced by a [`Report`] once the run is over.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing or flushing the output stream failed.
    #[error("report I/O error: {0}")]
    Io(#[from] io::Error),
}

// ------------------------------------------------------------------------------------------------
// Report trait
// ------------------------------------------------------------------------------------------------

/// Receives the events of a run, in execution order.
pub trait Report {
    /// A fixture is about to run its class hooks and tests.
    fn fixture_start(&mut self, name: &str);

    /// A fixture finished, after-class hooks included.
    fn fixture_end(&mut self, name: &str);

    /// A test body is about to run.
    fn test_start(&mut self, name: &str);

    /// A test body returned and was classified.
    fn test_end(&mut self, name: &str, verdict: Verdict);

    /// A check failed. `sequence` is the run-wide assertion number.
    fn assertion(&mut self, sequence: u64, location: &Location<'_>);

    /// A trace was emitted. `sequence` is the run-wide trace number.
    fn trace(&mut self, sequence: u64, location: &Location<'_>, message: &str);

    /// A hook panicked and the panic was counted as a failed check.
    fn panic(&mut self, sequence: u64, hook: &str, message: &str);

    /// All fixtures have run.
    fn summary(&mut self, summary: &RunSummary);

    /// Flushes output and surfaces any error deferred during the run.
    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Text reporter
// ------------------------------------------------------------------------------------------------

/// Writes the line-oriented text report to any [`Write`] sink.
pub struct TextReporter<W: Write> {
    out: W,
    count_width: usize,
    error: Option<io::Error>,
}

impl<W: Write> TextReporter<W> {
    /// Creates a reporter whose summary counts are right-aligned to `count_width`.
    pub fn new(out: W, count_width: usize) -> Self {
        Self {
            out,
            count_width,
            error: None,
        }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Borrows the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Whether a write has failed during this run.
    pub fn is_broken(&self) -> bool {
        self.error.is_some()
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = self
            .out
            .write_fmt(args)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = result {
            warn!("report output failed, suppressing further lines: {e}");
            self.error = Some(e);
        }
    }
}

impl<W: Write> Report for TextReporter<W> {
    fn fixture_start(&mut self, _name: &str) {
        self.line(format_args!("{FIXTURE_RULE}"));
    }

    fn fixture_end(&mut self, _name: &str) {
        self.line(format_args!("{FIXTURE_RULE}\n"));
    }

    fn test_start(&mut self, name: &str) {
        self.line(format_args!("[ RUN          ] {name}"));
    }

    fn test_end(&mut self, name: &str, verdict: Verdict) {
        match verdict {
            Verdict::Pass => self.line(format_args!("[       PASSED ] {name}")),
            Verdict::Fail { .. } => self.line(format_args!("[       FAILED ] {name}")),
        }
    }

    fn assertion(&mut self, sequence: u64, location: &Location<'_>) {
        self.line(format_args!(
            "{ANNOTATION}assert #{sequence} at {}:{}",
            location.file(),
            location.line()
        ));
    }

    fn trace(&mut self, sequence: u64, location: &Location<'_>, message: &str) {
        self.line(format_args!(
            "{ANNOTATION}trace #{sequence} at {}:{}: {message}",
            location.file(),
            location.line()
        ));
    }

    fn panic(&mut self, sequence: u64, hook: &str, message: &str) {
        self.line(format_args!("{ANNOTATION}panic #{sequence} in {hook}: {message}"));
    }

    fn summary(&mut self, summary: &RunSummary) {
        let width = self.count_width;
        self.line(format_args!("{SUMMARY_RULE}"));
        self.line(format_args!("[ TEST RESULTS ]"));
        self.line(format_args!("{SUMMARY_RULE}"));
        self.line(format_args!(
            "[    PASSED    ] {:>width$} tests",
            summary.passes
        ));
        self.line(format_args!(
            "[    FAILED    ] {:>width$} tests",
            summary.failures
        ));
        self.line(format_args!("{SUMMARY_RULE}"));
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }
        self.out.flush()?;
        Ok(())
    }
}
