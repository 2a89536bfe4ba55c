//! Fault isolation for user-supplied code
//!
//! Predicates, accessors, conditions and converters are written by callers.
//! A panic inside one of them must not escape `validate`; it is turned into
//! an ordinary validation failure instead.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::error::ValidationError;
use super::result::ValidationResult;

/// Runs `f`, capturing a panic as its message.
pub(crate) fn guarded<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

/// Runs a result-producing closure, turning a panic into a `custom_fault`
/// failure.
pub(crate) fn guard_result(
    origin: &'static str,
    f: impl FnOnce() -> ValidationResult,
) -> ValidationResult {
    match guarded(f) {
        Ok(result) => result,
        Err(fault) => {
            tracing::warn!(origin, fault = %fault, "user function faulted during validation");
            ValidationError::custom_fault(fault).into()
        }
    }
}

/// Extracts the text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
