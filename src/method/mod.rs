//! # Method Records
//!
//! A **hook** is a callable a fixture hands to registration, tagged with the
//! lifecycle [`Role`] it plays. Once registered, each hook is represented by
//! a [`MethodRecord`] living in one of its fixture's per-role chains.
//!
//! ## Representation
//!
//! Hooks are plain function pointers of the shape
//! `fn(&mut F, &mut TestContext<'_>)`, so a fixture method such as
//! `fn adds(&mut self, t: &mut TestContext<'_>)` coerces directly. The
//! callable itself stays inside the fixture's bound hook table; the record
//! only carries the slot index into that table, the display name, and the
//! role.
//!
//! ## Display names
//!
//! Names are bounded to [`MAX_NAME_LEN`] bytes. Longer names are truncated
//! on a UTF-8 character boundary.

// ------------------------------------------------------------------------------------------------
// Unit tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests;

// ------------------------------------------------------------------------------------------------
// Includes
// ------------------------------------------------------------------------------------------------

use std::fmt;

use crate::recorder::TestContext;

// ------------------------------------------------------------------------------------------------
// Constants
// ------------------------------------------------------------------------------------------------

/// Maximum length of a hook display name, in bytes.
pub const MAX_NAME_LEN: usize = 255;

// ------------------------------------------------------------------------------------------------
// Role
// ------------------------------------------------------------------------------------------------

/// The lifecycle role of a registered hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Runs before every test of the fixture.
    BeforeEach,

    /// Runs once, before anything else in the fixture.
    BeforeClass,

    /// Runs after every test of the fixture.
    AfterEach,

    /// Runs once, after everything else in the fixture.
    AfterClass,

    /// A test body.
    Test,
}

impl Role {
    /// Every role, in chain declaration order.
    pub const ALL: [Role; 5] = [
        Role::BeforeClass,
        Role::BeforeEach,
        Role::Test,
        Role::AfterEach,
        Role::AfterClass,
    ];

    /// Prefix used when deriving a display name from a function name.
    ///
    /// Tests carry no prefix.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Role::BeforeEach => Some("Before"),
            Role::BeforeClass => Some("BeforeClass"),
            Role::AfterEach => Some("After"),
            Role::AfterClass => Some("AfterClass"),
            Role::Test => None,
        }
    }

    /// Builds the conventional display name for a hook function.
    ///
    /// `Role::BeforeClass.display_name("open")` yields `"BeforeClass: open"`,
    /// `Role::Test.display_name("adds")` yields `"adds"`.
    pub fn display_name(self, function: &str) -> String {
        match self.label() {
            Some(label) => format!("{label}: {function}"),
            None => function.to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::BeforeEach => "before-each",
            Role::BeforeClass => "before-class",
            Role::AfterEach => "after-each",
            Role::AfterClass => "after-class",
            Role::Test => "test",
        };
        f.write_str(s)
    }
}

// ------------------------------------------------------------------------------------------------
// Hook descriptor
// ------------------------------------------------------------------------------------------------

/// The callable shape of every hook on a fixture of type `F`.
pub type HookFn<F> = fn(&mut F, &mut TestContext<'_>);

/// A hook descriptor: a callable, its display name, and its role.
///
/// Descriptors are produced by a fixture's [`Fixture::hooks`](crate::Fixture::hooks),
/// usually through the [`hooks!`](crate::hooks) macro, and consumed by
/// registration.
pub struct Hook<F> {
    pub(crate) call: HookFn<F>,
    pub(crate) name: String,
    pub(crate) role: Role,
}

impl<F> Hook<F> {
    /// Creates a descriptor with an explicit role and display name.
    pub fn new(role: Role, name: impl Into<String>, call: HookFn<F>) -> Self {
        Self {
            call,
            name: bounded_name(name.into()),
            role,
        }
    }

    /// A hook run before each test.
    pub fn before_each(name: impl Into<String>, call: HookFn<F>) -> Self {
        Self::new(Role::BeforeEach, name, call)
    }

    /// A hook run once before all tests.
    pub fn before_class(name: impl Into<String>, call: HookFn<F>) -> Self {
        Self::new(Role::BeforeClass, name, call)
    }

    /// A hook run after each test.
    pub fn after_each(name: impl Into<String>, call: HookFn<F>) -> Self {
        Self::new(Role::AfterEach, name, call)
    }

    /// A hook run once after all tests.
    pub fn after_class(name: impl Into<String>, call: HookFn<F>) -> Self {
        Self::new(Role::AfterClass, name, call)
    }

    /// A test body.
    pub fn test(name: impl Into<String>, call: HookFn<F>) -> Self {
        Self::new(Role::Test, name, call)
    }

    /// The descriptor's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The descriptor's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// ------------------------------------------------------------------------------------------------
// Method record
// ------------------------------------------------------------------------------------------------

/// A registered hook inside a fixture's role chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    name: String,
    role: Role,
    /// Index into the owning fixture's bound hook table.
    slot: usize,
}

impl MethodRecord {
    pub(crate) fn new(name: String, role: Role, slot: usize) -> Self {
        Self { name, role, slot }
    }

    /// Display name used in report lines.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role this record was registered with.
    pub fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }
}

// ------------------------------------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------------------------------------

/// Truncates `name` to at most [`MAX_NAME_LEN`] bytes on a char boundary.
pub(crate) fn bounded_name(mut name: String) -> String {
    if name.len() > MAX_NAME_LEN {
        let mut end = MAX_NAME_LEN;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}
