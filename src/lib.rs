//! # fixturekit
//!
//! An in-process test registration and execution engine. Fixtures declare
//! their hooks, register into a shared registry, and a runner executes them
//! in a deterministic order, tallying passes, failures, failed checks and
//! traces.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fixturekit::{Fixture, Hook, TestContext, assert_true, expect_equal, hooks};
//!
//! #[derive(Default)]
//! struct Stack {
//!     items: Vec<i32>,
//! }
//!
//! impl Stack {
//!     fn clear(&mut self, _t: &mut TestContext<'_>) {
//!         self.items.clear();
//!     }
//!
//!     fn push_then_pop(&mut self, t: &mut TestContext<'_>) {
//!         self.items.push(7);
//!         assert_true!(t, !self.items.is_empty());
//!         expect_equal!(t, self.items.pop(), Some(7));
//!     }
//! }
//!
//! impl Fixture for Stack {
//!     fn hooks() -> Vec<Hook<Self>> {
//!         hooks![before_each(clear), test(push_then_pop)]
//!     }
//! }
//!
//! fixturekit::register(Stack::default());
//! std::process::exit(fixturekit::run());
//! ```
//!
//! ## Outcome inference
//!
//! Hooks never return a verdict. Failing checks bump a shared counter, and
//! a test fails when the counter moved while its body ran. `assert_*!`
//! checks also return from the body at once; `expect_*!` checks let it
//! continue. Either way, a test counts as one failure however many of its
//! checks failed.
//!
//! ## Features
//!
//! - **Explicit registration**: fixtures land in a process-wide registry in
//!   the order they are registered; [`fixture_main!`] wires a fixed list.
//! - **Lifecycle hooks**: before/after each test and once per fixture.
//! - **Panic containment**: a panicking hook fails its test, not the run.
//! - **Text report** with per-assertion source locations and exit code.

pub(crate) mod fixture;
pub(crate) mod method;
pub(crate) mod recorder;
pub mod registry;
pub(crate) mod report;
pub(crate) mod runner;

#[doc(hidden)]
pub mod assertions;

pub use fixture::{Chains, Fixture, FixtureRecord};
pub use method::{Hook, HookFn, MAX_NAME_LEN, MethodRecord, Role};
pub use recorder::{FailureScope, Recorder, TestContext, Verdict};
pub use registry::{FixtureId, Registry, register};
pub use report::{Report, ReportError, TextReporter};
pub use runner::{RunSummary, Runner, RunnerConfig, RunnerError};

use tracing::error;

/// Runs every fixture in the process-wide registry with the default
/// configuration, printing the text report to standard output.
///
/// Returns the number of failed tests, suitable as a process exit code.
/// The registry is drained: fixtures registered before the call run once
/// and are dropped afterwards.
pub fn run() -> i32 {
    match run_with(RunnerConfig::default()) {
        Ok(summary) => summary.exit_code(),
        Err(e) => {
            error!("test run not started: {e}");
            1
        }
    }
}

/// Like [`run`], with an explicit configuration.
///
/// # Errors
///
/// Returns [`RunnerError::InvalidConfig`] if `config` is invalid; the
/// registry is left untouched in that case. Report output errors are
/// logged rather than returned, since the run itself has completed.
pub fn run_with(config: RunnerConfig) -> Result<RunSummary, RunnerError> {
    let mut runner = Runner::stdout(config)?;
    let mut fixtures = registry::take();

    let summary = runner.run(&mut fixtures);
    if let Err(e) = runner.finish() {
        error!("test report incomplete: {e}");
    }
    Ok(summary)
}
