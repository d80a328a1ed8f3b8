//! Assertion, trace and hook-declaration macros.
//!
//! Every check comes in two severities:
//!
//! - `assert_*!` records a failure and returns from the hook immediately.
//! - `expect_*!` records a failure and lets the hook keep going.
//!
//! Both take the hook's [`TestContext`](crate::TestContext) as their first
//! argument and record exactly one failed check per failing use, at the
//! line of the macro invocation. The aborting forms expand to a bare
//! `return;`, so they only work inside hooks returning `()`.
//!
//! The panic checks are the counterpart of exception expectations. Message
//! panics are one payload kind: `panic!` may throw `&'static str` or
//! `String` depending on whether the compiler folded its format arguments,
//! so expecting either of the two accepts both. Any other type must match
//! exactly what [`std::panic::panic_any`] was given.

use std::any::{Any, TypeId};
use std::panic::{self, AssertUnwindSafe};

/// Runs `f`, catching any panic it raises.
#[doc(hidden)]
pub fn catch<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    panic::catch_unwind(AssertUnwindSafe(f))
}

/// Whether `payload` counts as a panic of type `T`.
///
/// `String` and `&'static str` are interchangeable message payloads.
#[doc(hidden)]
pub fn payload_is<T: Any>(payload: &(dyn Any + Send)) -> bool {
    if payload.is::<T>() {
        return true;
    }
    is_message_type(TypeId::of::<T>())
        && (payload.is::<String>() || payload.is::<&'static str>())
}

fn is_message_type(id: TypeId) -> bool {
    id == TypeId::of::<String>() || id == TypeId::of::<&'static str>()
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ------------------------------------------------------------------------------------------------
// Hook declaration
// ------------------------------------------------------------------------------------------------

/// Builds a fixture's hook list from its method names.
///
/// Must be used inside the fixture's `impl` so that `Self::method`
/// resolves. Roles are `before_class`, `before_each`, `test`,
/// `after_each` and `after_class`.
///
/// ```rust,ignore
/// fn hooks() -> Vec<Hook<Self>> {
///     hooks![before_class(open), before_each(reset), test(adds), after_class(close)]
/// }
/// ```
#[macro_export]
macro_rules! hooks {
    (@hook before_class $f:ident) => {
        $crate::Hook::before_class(concat!("BeforeClass: ", stringify!($f)), Self::$f)
    };
    (@hook before_each $f:ident) => {
        $crate::Hook::before_each(concat!("Before: ", stringify!($f)), Self::$f)
    };
    (@hook test $f:ident) => {
        $crate::Hook::test(stringify!($f), Self::$f)
    };
    (@hook after_each $f:ident) => {
        $crate::Hook::after_each(concat!("After: ", stringify!($f)), Self::$f)
    };
    (@hook after_class $f:ident) => {
        $crate::Hook::after_class(concat!("AfterClass: ", stringify!($f)), Self::$f)
    };
    ($($role:ident($f:ident)),* $(,)?) => {
        ::std::vec![$($crate::hooks!(@hook $role $f)),*]
    };
}

// ------------------------------------------------------------------------------------------------
// Primitives
// ------------------------------------------------------------------------------------------------

/// Records a failed check and returns from the current hook.
#[macro_export]
macro_rules! abort {
    ($t:expr) => {{
        $t.fail();
        return;
    }};
}

/// Records a failed check; the hook continues.
#[macro_export]
macro_rules! fail {
    ($t:expr) => {
        $t.fail()
    };
}

/// Does nothing. Marks a branch as the intended outcome.
#[macro_export]
macro_rules! pass {
    ($t:expr) => {{
        let _ = &$t;
    }};
}

/// Emits a trace line with a formatted message.
#[macro_export]
macro_rules! trace {
    ($t:expr, $($arg:tt)+) => {
        $t.trace(::std::format!($($arg)+))
    };
}

// ------------------------------------------------------------------------------------------------
// Boolean and comparison checks
// ------------------------------------------------------------------------------------------------

#[doc(hidden)]
#[macro_export]
macro_rules! __check {
    ($t:expr, $ok:expr, abort) => {
        if $ok {
            $crate::pass!($t);
        } else {
            $crate::abort!($t);
        }
    };
    ($t:expr, $ok:expr, fail) => {
        if $ok {
            $crate::pass!($t);
        } else {
            $crate::fail!($t);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __compare {
    ($t:expr, $lhs:expr, $op:tt, $rhs:expr, $severity:ident) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::__check!($t, *lhs $op *rhs, $severity),
        }
    };
}

/// Aborts unless `cond` holds.
#[macro_export]
macro_rules! assert_true {
    ($t:expr, $cond:expr) => {
        $crate::__check!($t, $cond, abort)
    };
}

/// Fails unless `cond` holds.
#[macro_export]
macro_rules! expect_true {
    ($t:expr, $cond:expr) => {
        $crate::__check!($t, $cond, fail)
    };
}

/// Aborts if `cond` holds.
#[macro_export]
macro_rules! assert_false {
    ($t:expr, $cond:expr) => {
        $crate::__check!($t, !($cond), abort)
    };
}

/// Fails if `cond` holds.
#[macro_export]
macro_rules! expect_false {
    ($t:expr, $cond:expr) => {
        $crate::__check!($t, !($cond), fail)
    };
}

/// Aborts unless `lhs == rhs`.
#[macro_export]
macro_rules! assert_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, ==, $rhs, abort)
    };
}

/// Fails unless `lhs == rhs`.
#[macro_export]
macro_rules! expect_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, ==, $rhs, fail)
    };
}

/// Aborts unless `lhs != rhs`.
#[macro_export]
macro_rules! assert_not_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, !=, $rhs, abort)
    };
}

/// Fails unless `lhs != rhs`.
#[macro_export]
macro_rules! expect_not_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, !=, $rhs, fail)
    };
}

/// Aborts unless `lhs > rhs`.
#[macro_export]
macro_rules! assert_greater_than {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, >, $rhs, abort)
    };
}

/// Fails unless `lhs > rhs`.
#[macro_export]
macro_rules! expect_greater_than {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, >, $rhs, fail)
    };
}

/// Aborts unless `lhs >= rhs`.
#[macro_export]
macro_rules! assert_greater_than_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, >=, $rhs, abort)
    };
}

/// Fails unless `lhs >= rhs`.
#[macro_export]
macro_rules! expect_greater_than_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, >=, $rhs, fail)
    };
}

/// Aborts unless `lhs < rhs`.
#[macro_export]
macro_rules! assert_less_than {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, <, $rhs, abort)
    };
}

/// Fails unless `lhs < rhs`.
#[macro_export]
macro_rules! expect_less_than {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, <, $rhs, fail)
    };
}

/// Aborts unless `lhs <= rhs`.
#[macro_export]
macro_rules! assert_less_than_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, <=, $rhs, abort)
    };
}

/// Fails unless `lhs <= rhs`.
#[macro_export]
macro_rules! expect_less_than_equal {
    ($t:expr, $lhs:expr, $rhs:expr) => {
        $crate::__compare!($t, $lhs, <=, $rhs, fail)
    };
}

// ------------------------------------------------------------------------------------------------
// Panic checks
// ------------------------------------------------------------------------------------------------

#[doc(hidden)]
#[macro_export]
macro_rules! __panics_with {
    ($t:expr, $stmt:expr, $ty:ty, $severity:ident) => {
        match $crate::assertions::catch(|| {
            $stmt;
        }) {
            ::std::result::Result::Err(payload)
                if $crate::assertions::payload_is::<$ty>(&*payload) =>
            {
                $crate::pass!($t)
            }
            _ => $crate::__check!($t, false, $severity),
        }
    };
}

/// Aborts unless `stmt` panics with a payload of type `ty`.
///
/// `String` and `&'static str` both accept any message panic.
#[macro_export]
macro_rules! assert_panics {
    ($t:expr, $stmt:expr, $ty:ty) => {
        $crate::__panics_with!($t, $stmt, $ty, abort)
    };
}

/// Fails unless `stmt` panics with a payload of type `ty`.
///
/// `String` and `&'static str` both accept any message panic.
#[macro_export]
macro_rules! expect_panics {
    ($t:expr, $stmt:expr, $ty:ty) => {
        $crate::__panics_with!($t, $stmt, $ty, fail)
    };
}

/// Aborts if `stmt` panics.
#[macro_export]
macro_rules! assert_no_panic {
    ($t:expr, $stmt:expr) => {
        $crate::__check!(
            $t,
            $crate::assertions::catch(|| {
                $stmt;
            })
            .is_ok(),
            abort
        )
    };
}

/// Fails if `stmt` panics.
#[macro_export]
macro_rules! expect_no_panic {
    ($t:expr, $stmt:expr) => {
        $crate::__check!(
            $t,
            $crate::assertions::catch(|| {
                $stmt;
            })
            .is_ok(),
            fail
        )
    };
}

/// Aborts unless `stmt` panics with any payload.
#[macro_export]
macro_rules! assert_any_panic {
    ($t:expr, $stmt:expr) => {
        $crate::__check!(
            $t,
            $crate::assertions::catch(|| {
                $stmt;
            })
            .is_err(),
            abort
        )
    };
}

/// Fails unless `stmt` panics with any payload.
#[macro_export]
macro_rules! expect_any_panic {
    ($t:expr, $stmt:expr) => {
        $crate::__check!(
            $t,
            $crate::assertions::catch(|| {
                $stmt;
            })
            .is_err(),
            fail
        )
    };
}
