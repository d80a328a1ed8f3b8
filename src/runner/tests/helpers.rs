use std::panic::Location;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::recorder::Verdict;
use crate::report::Report;
use crate::runner::{RunSummary, Runner, RunnerConfig};

/// Initialize tracing subscriber controlled by `RUST_LOG` env var.
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shared, append-only event log. Hooks and the [`EventLog`] report write
/// into the same log so their interleaving can be asserted.
#[derive(Debug, Clone, Default)]
pub struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Events with the given prefix, prefix stripped.
    pub fn filtered(&self, prefix: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix(prefix).map(str::to_string))
            .collect()
    }
}

/// A [`Report`] that records events as short strings.
pub struct EventLog {
    pub log: Log,
}

impl Report for EventLog {
    fn fixture_start(&mut self, name: &str) {
        self.log.push(format!("fixture-start {name}"));
    }

    fn fixture_end(&mut self, name: &str) {
        self.log.push(format!("fixture-end {name}"));
    }

    fn test_start(&mut self, name: &str) {
        self.log.push(format!("run {name}"));
    }

    fn test_end(&mut self, name: &str, verdict: Verdict) {
        let word = if verdict.is_pass() { "passed" } else { "failed" };
        self.log.push(format!("{word} {name}"));
    }

    fn assertion(&mut self, sequence: u64, _location: &Location<'_>) {
        self.log.push(format!("assert #{sequence}"));
    }

    fn trace(&mut self, sequence: u64, _location: &Location<'_>, message: &str) {
        self.log.push(format!("trace #{sequence} {message}"));
    }

    fn panic(&mut self, sequence: u64, hook: &str, message: &str) {
        self.log.push(format!("panic #{sequence} {hook}: {message}"));
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.log
            .push(format!("summary {} {}", summary.passes, summary.failures));
    }
}

/// A runner with default config reporting into `log`.
pub fn logging_runner(log: &Log) -> Runner<EventLog> {
    logging_runner_with(log, RunnerConfig::default())
}

pub fn logging_runner_with(log: &Log, config: RunnerConfig) -> Runner<EventLog> {
    init_tracing();
    Runner::new(config, EventLog { log: log.clone() }).expect("runner")
}
