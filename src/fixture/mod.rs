//! # Fixtures
//!
//! A fixture is a value plus an ordered set of hooks that operate on it.
//! Implement [`Fixture`] to declare the hooks, then register an instance;
//! registration binds the instance to its hook table and sorts the hooks
//! into five per-role chains.
//!
//! ```rust
//! use fixturekit::{Fixture, Hook, TestContext, expect_equal, hooks};
//!
//! #[derive(Default)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! impl Counter {
//!     fn reset(&mut self, _t: &mut TestContext<'_>) {
//!         self.value = 0;
//!     }
//!
//!     fn increments(&mut self, t: &mut TestContext<'_>) {
//!         self.value += 1;
//!         expect_equal!(t, self.value, 1);
//!     }
//! }
//!
//! impl Fixture for Counter {
//!     fn hooks() -> Vec<Hook<Self>> {
//!         hooks![before_each(reset), test(increments)]
//!     }
//! }
//! ```
//!
//! ## Ownership
//!
//! The [`FixtureRecord`] owns the fixture instance, so every hook of one
//! registration shares the same state. State carried across tests is
//! intentional: there is no isolation between tests of a fixture.

// ------------------------------------------------------------------------------------------------
// Unit tests
// ------------------------------------------------------------------------------------------------


// ------------------------------------------------------------------------------------------------
// Includes
// ------------------------------------------------------------------------------------------------

use std::any;
use std::fmt;

use crate::method::{Hook, HookFn, MethodRecord, Role, bounded_name};
use crate::recorder::TestContext;

// ------------------------------------------------------------------------------------------------
// Fixture trait
// ------------------------------------------------------------------------------------------------

/// A type whose methods form a group of tests with shared setup and teardown.
pub trait Fixture: Send + 'static {
    /// The fixture's hooks, in registration order.
    fn hooks() -> Vec<Hook<Self>>
    where
        Self: Sized;

    /// Display name of this fixture. Defaults to the unqualified type name.
    fn name(&self) -> String {
        short_type_name(any::type_name::<Self>())
    }
}

// ------------------------------------------------------------------------------------------------
// Bound instance
// ------------------------------------------------------------------------------------------------

/// A fixture instance erased behind the hook slots it can run.
pub(crate) trait BoundFixture: Send {
    fn invoke(&mut self, slot: usize, cx: &mut TestContext<'_>);
}

struct Bound<F> {
    instance: F,
    table: Vec<HookFn<F>>,
}

impl<F: Send> BoundFixture for Bound<F> {
    fn invoke(&mut self, slot: usize, cx: &mut TestContext<'_>) {
        if let Some(call) = self.table.get(slot).copied() {
            call(&mut self.instance, cx);
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Chains
// ------------------------------------------------------------------------------------------------

/// The per-role hook chains of one fixture, each in registration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Chains {
    before_class: Vec<MethodRecord>,
    before_each: Vec<MethodRecord>,
    tests: Vec<MethodRecord>,
    after_each: Vec<MethodRecord>,
    after_class: Vec<MethodRecord>,
}

impl Chains {
    /// The chain holding hooks of `role`.
    pub fn get(&self, role: Role) -> &[MethodRecord] {
        match role {
            Role::BeforeClass => &self.before_class,
            Role::BeforeEach => &self.before_each,
            Role::Test => &self.tests,
            Role::AfterEach => &self.after_each,
            Role::AfterClass => &self.after_class,
        }
    }

    fn get_mut(&mut self, role: Role) -> &mut Vec<MethodRecord> {
        match role {
            Role::BeforeClass => &mut self.before_class,
            Role::BeforeEach => &mut self.before_each,
            Role::Test => &mut self.tests,
            Role::AfterEach => &mut self.after_each,
            Role::AfterClass => &mut self.after_class,
        }
    }

    /// Total hooks across every chain.
    pub fn len(&self) -> usize {
        Role::ALL.iter().map(|&role| self.get(role).len()).sum()
    }

    /// Whether every chain is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ------------------------------------------------------------------------------------------------
// Fixture record
// ------------------------------------------------------------------------------------------------

/// One registration: a bound fixture instance and its hook chains.
pub struct FixtureRecord {
    name: String,
    instance: Box<dyn BoundFixture>,
    chains: Chains,
}

impl FixtureRecord {
    /// Binds `instance` to the supplied descriptors.
    ///
    /// Descriptors are distributed into their role chains in the order
    /// given; `None` entries are skipped.
    pub(crate) fn bind<F, I>(name: String, instance: F, descriptors: I) -> Self
    where
        F: Send + 'static,
        I: IntoIterator,
        I::Item: Into<Option<Hook<F>>>,
    {
        let mut table: Vec<HookFn<F>> = Vec::new();
        let mut chains = Chains::default();

        for hook in descriptors.into_iter().filter_map(Into::<Option<Hook<F>>>::into) {
            let slot = table.len();
            table.push(hook.call);
            chains
                .get_mut(hook.role)
                .push(MethodRecord::new(hook.name, hook.role, slot));
        }

        Self {
            name: bounded_name(name),
            instance: Box::new(Bound { instance, table }),
            chains,
        }
    }

    /// The fixture's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All hook chains.
    pub fn chains(&self) -> &Chains {
        &self.chains
    }

    /// Hooks of one role, in registration order.
    pub fn chain(&self, role: Role) -> &[MethodRecord] {
        self.chains.get(role)
    }

    /// Splits the record so hooks can run while the chains are iterated.
    pub(crate) fn split(&mut self) -> (&str, &mut dyn BoundFixture, &Chains) {
        (&self.name, self.instance.as_mut(), &self.chains)
    }
}

impl fmt::Debug for FixtureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureRecord")
            .field("name", &self.name)
            .field("chains", &self.chains)
            .finish_non_exhaustive()
    }
}

// ------------------------------------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------------------------------------

/// Strips module paths from a type name, keeping generic arguments.
///
/// `app::tests::Math<core::primitive::u8>` becomes `Math<core::primitive::u8>`.
fn short_type_name(full: &str) -> String {
    let (base, generics) = match full.find('<') {
        Some(pos) => full.split_at(pos),
        None => (full, ""),
    };
    let short = base.rsplit("::").next().unwrap_or(base);
    format!("{short}{generics}")
}
