//! # Recorder
//!
//! Counters from which test outcomes are inferred.
//!
//! A test body never returns a verdict. Instead, every failing check bumps
//! the shared assertion counter, and the runner compares the counter
//! before and after the body runs. The comparison is packaged as a
//! [`FailureScope`]: open it on entry, close it on exit, and the delta
//! decides the [`Verdict`].
//!
//! Hooks reach the recorder through a [`TestContext`], which also forwards
//! each assertion and trace to the active [`Report`] together with the
//! caller's source location.

// ------------------------------------------------------------------------------------------------
// Unit tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests;

// ------------------------------------------------------------------------------------------------
// Includes
// ------------------------------------------------------------------------------------------------

use std::panic::Location;

use crate::report::Report;

// ------------------------------------------------------------------------------------------------
// Recorder
// ------------------------------------------------------------------------------------------------

/// Monotonic counters for one runner invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
    assertions: u64,
    passes: u64,
    failures: u64,
    traces: u64,
}

impl Recorder {
    /// Creates a recorder with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total failed checks so far.
    pub fn assertions(&self) -> u64 {
        self.assertions
    }

    /// Total passing tests so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Total failing tests so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Total traces so far.
    pub fn traces(&self) -> u64 {
        self.traces
    }

    /// Records a failed check and returns its 1-based sequence number.
    pub fn record_assertion(&mut self) -> u64 {
        self.assertions += 1;
        self.assertions
    }

    /// Records a trace and returns its 1-based sequence number.
    pub fn record_trace(&mut self) -> u64 {
        self.traces += 1;
        self.traces
    }

    /// Tallies a classified test.
    pub fn record_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Pass => self.passes += 1,
            Verdict::Fail { .. } => self.failures += 1,
        }
    }

    /// Opens a failure scope at the current assertion count.
    pub fn scope(&self) -> FailureScope {
        FailureScope {
            start: self.assertions,
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ------------------------------------------------------------------------------------------------
// Failure scope
// ------------------------------------------------------------------------------------------------

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No check failed while the test body ran.
    Pass,

    /// At least one check failed. `assertions` is how many.
    Fail { assertions: u64 },
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Snapshot of the assertion counter taken when a test body starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a failure scope decides nothing until it is closed"]
pub struct FailureScope {
    start: u64,
}

impl FailureScope {
    /// Counter value captured on entry.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Compares the recorder against the snapshot.
    ///
    /// Any increase is a failure, however large; an unchanged counter is a pass.
    pub fn close(self, recorder: &Recorder) -> Verdict {
        match recorder.assertions.saturating_sub(self.start) {
            0 => Verdict::Pass,
            assertions => Verdict::Fail { assertions },
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Test context
// ------------------------------------------------------------------------------------------------

/// Handle passed to every hook invocation.
///
/// Checks signal failure through [`TestContext::fail`]; diagnostics go
/// through [`TestContext::trace`]. Both report the caller's location, so the
/// assertion macros point at the line that used them.
pub struct TestContext<'r> {
    recorder: &'r mut Recorder,
    report: &'r mut dyn Report,
}

impl<'r> TestContext<'r> {
    pub fn new(recorder: &'r mut Recorder, report: &'r mut dyn Report) -> Self {
        Self { recorder, report }
    }

    /// Records one failed check at the caller's location.
    #[track_caller]
    pub fn fail(&mut self) {
        let location = Location::caller();
        let sequence = self.recorder.record_assertion();
        self.report.assertion(sequence, location);
    }

    /// Emits a trace line at the caller's location. Never affects the verdict.
    #[track_caller]
    pub fn trace(&mut self, message: impl AsRef<str>) {
        let location = Location::caller();
        let sequence = self.recorder.record_trace();
        self.report.trace(sequence, location, message.as_ref());
    }

    /// Failed checks recorded so far in this run.
    pub fn assertions(&self) -> u64 {
        self.recorder.assertions()
    }

    /// Traces recorded so far in this run.
    pub fn traces(&self) -> u64 {
        self.recorder.traces()
    }
}
