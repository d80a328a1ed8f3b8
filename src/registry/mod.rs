//! # Registry
//!
//! The ordered collection of registered fixtures.
//!
//! A [`Registry`] is an arena: it owns every [`FixtureRecord`] for its whole
//! lifetime and hands out [`FixtureId`] index handles. Fixtures never own
//! the registry or each other, and clearing it is an explicit
//! [`Registry::reset`].
//!
//! ## Process-wide registry
//!
//! Fixtures defined anywhere in a program register into one shared
//! instance through [`register`]. A single entry point such as
//! [`crate::run`] or [`fixture_main!`](crate::fixture_main) later drains it.
//! The shared instance is guarded by a mutex only so that registration is
//! sound from any thread; running two runners against it concurrently is
//! not supported.
//!
//! ## Ordering
//!
//! Fixtures run in registration order. Registering the same type twice
//! creates two independent records, and both run.

// ------------------------------------------------------------------------------------------------
// Unit tests
// ------------------------------------------------------------------------------------------------


// ------------------------------------------------------------------------------------------------
// Includes
// ------------------------------------------------------------------------------------------------

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::fixture::{Fixture, FixtureRecord};
use crate::method::Hook;

// ------------------------------------------------------------------------------------------------
// Handles
// ------------------------------------------------------------------------------------------------

/// Index of a fixture inside the registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixtureId(usize);

impl FixtureId {
    /// Zero-based registration position.
    pub fn index(self) -> usize {
        self.0
    }
}

// ------------------------------------------------------------------------------------------------
// Registry
// ------------------------------------------------------------------------------------------------

/// Arena owning registered fixtures in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    fixtures: Vec<FixtureRecord>,
}

impl Registry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            fixtures: Vec::new(),
        }
    }

    /// Registers `fixture` with the hooks its type declares.
    pub fn register<F: Fixture>(&mut self, fixture: F) -> FixtureId {
        let name = fixture.name();
        self.register_hooks(name, fixture, F::hooks())
    }

    /// Registers `fixture` under `name` with an explicit descriptor list.
    ///
    /// Descriptors may be plain [`Hook`]s or `Option<Hook>`; `None` entries
    /// are skipped. A fresh record is always appended, never merged.
    pub fn register_hooks<F, I>(
        &mut self,
        name: impl Into<String>,
        fixture: F,
        hooks: I,
    ) -> FixtureId
    where
        F: Send + 'static,
        I: IntoIterator,
        I::Item: Into<Option<Hook<F>>>,
    {
        let id = FixtureId(self.fixtures.len());
        let record = FixtureRecord::bind(name.into(), fixture, hooks);

        trace!(
            fixture = record.name(),
            index = id.0,
            hooks = record.chains().len(),
            "fixture registered"
        );

        self.fixtures.push(record);
        id
    }

    /// Number of registered fixtures.
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// Whether no fixture is registered.
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Looks up a fixture by handle.
    pub fn get(&self, id: FixtureId) -> Option<&FixtureRecord> {
        self.fixtures.get(id.0)
    }

    /// Iterates fixtures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FixtureRecord> {
        self.fixtures.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut FixtureRecord> {
        self.fixtures.iter_mut()
    }

    /// Drops every registered fixture. Existing handles become dangling.
    pub fn reset(&mut self) {
        self.fixtures.clear();
    }
}

// ------------------------------------------------------------------------------------------------
// Process-wide registry
// ------------------------------------------------------------------------------------------------

static GLOBAL: Mutex<Registry> = Mutex::new(Registry::new());

/// Locks the process-wide registry.
///
/// A poisoned lock is recovered: registration only ever appends, so a
/// panic mid-registration cannot leave a half-built record behind.
fn global() -> MutexGuard<'static, Registry> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers `fixture` into the process-wide registry.
pub fn register<F: Fixture>(fixture: F) -> FixtureId {
    let name = fixture.name();
    let hooks = F::hooks();
    global().register_hooks(name, fixture, hooks)
}

/// Registers `fixture` with explicit hooks into the process-wide registry.
pub fn register_hooks<F, I>(name: impl Into<String>, fixture: F, hooks: I) -> FixtureId
where
    F: Send + 'static,
    I: IntoIterator,
    I::Item: Into<Option<Hook<F>>>,
{
    // Descriptor iterators may run user code; keep it outside the lock.
    let hooks: Vec<Option<Hook<F>>> = hooks.into_iter().map(Into::into).collect();
    let name = name.into();
    global().register_hooks(name, fixture, hooks)
}

/// Number of fixtures in the process-wide registry.
pub fn len() -> usize {
    global().len()
}

/// Clears the process-wide registry.
///
/// Fixtures are dropped after the lock is released, so a `Drop` impl may
/// use the registry.
pub fn reset() {
    drop(take());
}

/// Moves every fixture out of the process-wide registry, leaving it empty.
pub fn take() -> Registry {
    std::mem::take(&mut *global())
}
