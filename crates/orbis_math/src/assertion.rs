//! Reporting of violated preconditions.

use crate::config::{self, AssertionPolicy};
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// A violated precondition of a math operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("math assertion failed at {file}:{line}: {message}")]
pub struct AssertionFailure {
    /// Description of the violated precondition.
    pub message: String,
    /// Source file of the failed assertion.
    pub file: &'static str,
    /// Source line of the failed assertion.
    pub line: u32,
}

/// Reports a failed assertion according to the active
/// [`AssertionPolicy`]. Called by [`math_assert!`](crate::math_assert).
///
/// # Panics
/// Under [`AssertionPolicy::Panic`], with an [`AssertionFailure`] payload.
#[cold]
#[inline(never)]
pub fn report_failure(message: String, file: &'static str, line: u32) {
    let failure = AssertionFailure {
        message,
        file,
        line,
    };
    match config::assertion_policy() {
        AssertionPolicy::Panic => {
            log::error!("{failure}");
            panic::panic_any(failure);
        }
        AssertionPolicy::Abort => {
            log::error!("{failure}; aborting");
            std::process::abort();
        }
        AssertionPolicy::Ignore => {
            log::debug!("Ignoring {failure}");
        }
    }
}

/// Runs the given closure and converts a panic caused by a failed math
/// assertion into an [`AssertionFailure`] error. Other panics are resumed.
///
/// # Errors
/// Returns the [`AssertionFailure`] raised inside the closure, if any.
pub fn catch_assertion<T>(f: impl FnOnce() -> T) -> Result<T, AssertionFailure> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<AssertionFailure>() {
            Ok(failure) => Err(*failure),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_assertion_returns_value() {
        let result = catch_assertion(|| {
            math_assert!(1 + 1 == 2, "arithmetic is broken");
            42
        });
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn failing_assertion_is_caught_with_message() {
        let failure = catch_assertion(|| {
            math_assert!(false, "value was {}", 7);
        })
        .unwrap_err();
        assert_eq!(failure.message, "value was 7");
        assert!(failure.file.ends_with("assertion.rs"));
        assert!(failure.to_string().contains("value was 7"));
    }

    #[test]
    #[should_panic(expected = "unrelated")]
    fn unrelated_panics_are_resumed() {
        let _ = catch_assertion(|| -> i32 { panic!("unrelated") });
    }
}
