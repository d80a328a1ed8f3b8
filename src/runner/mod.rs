//! # Runner
//!
//! Executes every fixture of a [`Registry`] exactly once, in registration
//! order, and classifies each test from the assertion counter.
//!
//! ## Execution order
//!
//! For each fixture:
//!
//! 1. fixture-start marker;
//! 2. every before-class hook;
//! 3. for every test: every before-each hook, the test body inside a
//!    [`FailureScope`](crate::FailureScope), every after-each hook;
//! 4. every after-class hook;
//! 5. fixture-end marker.
//!
//! Nothing short-circuits: earlier failures never skip later hooks, tests,
//! or fixtures. A test passes when its body recorded no failed check and
//! fails otherwise, counting once no matter how many checks failed.
//!
//! ## Panics
//!
//! With [`RunnerConfig::catch_panics`] set (the default), a panic escaping
//! any hook is caught at that hook's boundary and recorded as one failed
//! check. A panicking test body therefore fails its test; a panicking
//! lifecycle hook is reported and counted but does not change a verdict.
//! The run carries on with the next hook either way. Fixture state left
//! behind by the panic is used as is.
//!
//! With `catch_panics` off the panic propagates out of [`Runner::run`].

// ------------------------------------------------------------------------------------------------
// Unit tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests;

// ------------------------------------------------------------------------------------------------
// Includes
// ------------------------------------------------------------------------------------------------

use std::{
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assertions::panic_message;
use crate::fixture::{BoundFixture, FixtureRecord};
use crate::method::{MethodRecord, Role};
use crate::recorder::{Recorder, TestContext};
use crate::registry::Registry;
use crate::report::{Report, ReportError, TextReporter};

// ------------------------------------------------------------------------------------------------
// Configuration
// ------------------------------------------------------------------------------------------------

/// Configuration for a [`Runner`].
///
/// All fields have sensible defaults via [`RunnerConfig::default()`]. The
/// configuration is validated by [`Runner::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Catch panics escaping hooks and count them as failed checks.
    ///
    /// Default: `true`.
    pub catch_panics: bool,

    /// Column width of the pass/fail counts in the text summary.
    ///
    /// Default: 4. Must be in `1..=20`.
    pub count_width: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            count_width: 4,
        }
    }
}

impl RunnerConfig {
    /// Validates all configuration parameters.
    pub fn validate(&self) -> Result<(), RunnerError> {
        if !(1..=20).contains(&self.count_width) {
            return Err(RunnerError::InvalidConfig(
                "count_width must be in 1..=20".into(),
            ));
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Error type
// ------------------------------------------------------------------------------------------------

/// Errors returned by [`Runner`] construction and teardown.
///
/// A run itself never fails: test failures end up in the counters.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Invalid configuration parameter.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The report could not be completed.
    #[error("{0}")]
    Report(#[from] ReportError),
}

// ------------------------------------------------------------------------------------------------
// Summary
// ------------------------------------------------------------------------------------------------

/// Totals of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Fixtures executed.
    pub fixtures: u64,

    /// Tests classified as passing.
    pub passes: u64,

    /// Tests classified as failing.
    pub failures: u64,

    /// Failed checks, caught panics included.
    pub assertions: u64,

    /// Traces emitted.
    pub traces: u64,
}

impl RunSummary {
    /// Process exit code: the number of failed tests, saturated to `i32::MAX`.
    pub fn exit_code(&self) -> i32 {
        i32::try_from(self.failures).unwrap_or(i32::MAX)
    }

    /// Whether every test passed.
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

// ------------------------------------------------------------------------------------------------
// Runner
// ------------------------------------------------------------------------------------------------

/// Drives fixtures, owns the run's [`Recorder`], and feeds a [`Report`].
pub struct Runner<R: Report> {
    config: RunnerConfig,
    recorder: Recorder,
    report: R,
}

impl Runner<TextReporter<io::Stdout>> {
    /// A runner printing the text report to standard output.
    pub fn stdout(config: RunnerConfig) -> Result<Self, RunnerError> {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> Runner<TextReporter<W>> {
    /// A runner writing the text report to `out`.
    pub fn with_writer(config: RunnerConfig, out: W) -> Result<Self, RunnerError> {
        let width = config.count_width;
        Self::new(config, TextReporter::new(out, width))
    }
}

impl<R: Report> Runner<R> {
    /// Creates a runner reporting to `report`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidConfig`] if any configuration parameter
    /// is out of range.
    pub fn new(config: RunnerConfig, report: R) -> Result<Self, RunnerError> {
        config.validate()?;
        Ok(Self {
            config,
            recorder: Recorder::new(),
            report,
        })
    }

    /// Counters of the most recent run.
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// The report sink.
    pub fn report(&self) -> &R {
        &self.report
    }

    /// Runs every fixture in `registry` and returns the totals.
    ///
    /// Counters are reset first, so each call reports only its own run.
    pub fn run(&mut self, registry: &mut Registry) -> RunSummary {
        self.recorder.reset();
        info!(fixtures = registry.len(), "test run started");

        let mut fixtures = 0;
        for record in registry.iter_mut() {
            self.run_fixture(record);
            fixtures += 1;
        }

        let summary = RunSummary {
            fixtures,
            passes: self.recorder.passes(),
            failures: self.recorder.failures(),
            assertions: self.recorder.assertions(),
            traces: self.recorder.traces(),
        };
        self.report.summary(&summary);

        info!(
            passes = summary.passes,
            failures = summary.failures,
            assertions = summary.assertions,
            "test run finished"
        );
        summary
    }

    /// Completes the report and hands it back.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Report`] if any report output was lost.
    pub fn finish(mut self) -> Result<R, RunnerError> {
        self.report.finish()?;
        Ok(self.report)
    }

    // --------------------------------------------------------------------------------------------
    // Internal helpers
    // --------------------------------------------------------------------------------------------

    fn run_fixture(&mut self, record: &mut FixtureRecord) {
        let (name, instance, chains) = record.split();
        debug!(fixture = name, tests = chains.get(Role::Test).len(), "fixture started");
        self.report.fixture_start(name);

        self.run_chain(instance, chains.get(Role::BeforeClass));

        for test in chains.get(Role::Test) {
            self.run_chain(instance, chains.get(Role::BeforeEach));

            let scope = self.recorder.scope();
            self.report.test_start(test.name());
            self.invoke(instance, test);
            let verdict = scope.close(&self.recorder);

            self.recorder.record_verdict(verdict);
            self.report.test_end(test.name(), verdict);
            debug!(test = test.name(), ?verdict, "test classified");

            self.run_chain(instance, chains.get(Role::AfterEach));
        }

        self.run_chain(instance, chains.get(Role::AfterClass));

        self.report.fixture_end(name);
        debug!(fixture = name, "fixture finished");
    }

    fn run_chain(&mut self, instance: &mut dyn BoundFixture, chain: &[MethodRecord]) {
        for method in chain {
            self.invoke(instance, method);
        }
    }

    fn invoke(&mut self, instance: &mut dyn BoundFixture, method: &MethodRecord) {
        debug!(hook = method.name(), role = %method.role(), "invoking hook");

        let slot = method.slot();
        let mut cx = TestContext::new(&mut self.recorder, &mut self.report);

        if !self.config.catch_panics {
            instance.invoke(slot, &mut cx);
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| instance.invoke(slot, &mut cx)));
        if let Err(payload) = outcome {
            let message = panic_message(&*payload);
            let sequence = self.recorder.record_assertion();
            warn!(hook = method.name(), %message, "hook panicked");
            self.report.panic(sequence, method.name(), &message);
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Entry point macro
// ------------------------------------------------------------------------------------------------

/// Generates `fn main` for a test binary.
///
/// Each listed fixture type is constructed with `Default::default()` and
/// registered in the order given, then every registered fixture runs and
/// the process exits with the number of failed tests.
///
/// ```rust,no_run
/// use fixturekit::{Fixture, Hook, TestContext, expect_true, hooks};
///
/// #[derive(Default)]
/// struct ParserTests;
///
/// impl ParserTests {
///     fn parses(&mut self, t: &mut TestContext<'_>) {
///         expect_true!(t, "1 + 2".contains('+'));
///     }
/// }
///
/// impl Fixture for ParserTests {
///     fn hooks() -> Vec<Hook<Self>> {
///         hooks![test(parses)]
///     }
/// }
///
/// fixturekit::fixture_main!(ParserTests);
/// ```
#[macro_export]
macro_rules! fixture_main {
    ($($fixture:ty),+ $(,)?) => {
        fn main() {
            $(
                $crate::register(<$fixture as ::core::default::Default>::default());
            )+
            ::std::process::exit($crate::run());
        }
    };
}
