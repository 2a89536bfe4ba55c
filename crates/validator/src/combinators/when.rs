//! WHEN combinator - conditional validation
//!
//! [`When`] always runs a base validator and runs a second validator only if
//! a condition over the value holds (or, for [`unless`], does not hold). The
//! results are combined. A null value never satisfies the condition, and
//! the condition itself is not called for it.
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! // Long identifiers must also be lowercase.
//! let validator = when(
//!     string().max_length(32),
//!     |s: &str| s.len() > 8,
//!     string().lowercase(),
//! );
//! assert!(validator.validate("ShortID").is_valid());
//! assert!(!validator.validate("LongerIdentifier").is_valid());
//! ```

use crate::foundation::guard::guarded;
use crate::foundation::{Validate, ValidationError, ValidationResult};

/// Runs `then` in addition to `base` when `condition` matches `expected`.
///
/// # Type Parameters
///
/// * `B` - The base validator, always run
/// * `V` - The conditional validator
/// * `C` - The condition function (`Fn(&Input) -> bool`)
#[derive(Debug, Clone, Copy)]
pub struct When<B, V, C> {
    pub(crate) base: B,
    pub(crate) then: V,
    pub(crate) condition: C,
    expected: bool,
}

impl<B, V, C> When<B, V, C> {
    /// Runs `then` when `condition` returns `true`.
    pub fn new(base: B, condition: C, then: V) -> Self {
        Self {
            base,
            then,
            condition,
            expected: true,
        }
    }

    /// Runs `then` when `condition` returns `false`.
    pub fn unless(base: B, condition: C, then: V) -> Self {
        Self {
            base,
            then,
            condition,
            expected: false,
        }
    }

    /// Returns a reference to the base validator.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Returns a reference to the conditional validator.
    pub fn then(&self) -> &V {
        &self.then
    }

    /// Returns a reference to the condition function.
    pub fn condition(&self) -> &C {
        &self.condition
    }

    /// Extracts the base validator, the conditional validator and the
    /// condition.
    pub fn into_parts(self) -> (B, V, C) {
        (self.base, self.then, self.condition)
    }
}

impl<B, V, C> Validate for When<B, V, C>
where
    B: Validate,
    V: Validate<Input = B::Input>,
    C: Fn(&B::Input) -> bool,
{
    type Input = B::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        let mut result = self.base.validate_nullable(input);
        let Some(value) = input else {
            return result;
        };
        match guarded(|| (self.condition)(value)) {
            Ok(holds) if holds == self.expected => result.merge(self.then.validate(value)),
            Ok(_) => {}
            Err(fault) => {
                tracing::warn!(fault = %fault, "condition faulted during validation");
                result.push(ValidationError::custom_fault(fault));
            }
        }
        result
    }
}

/// Creates a `When` combinator that runs `then` if `condition` holds.
pub fn when<B, V, C>(base: B, condition: C, then: V) -> When<B, V, C>
where
    B: Validate,
    V: Validate<Input = B::Input>,
    C: Fn(&B::Input) -> bool,
{
    When::new(base, condition, then)
}

/// Creates a `When` combinator that runs `then` unless `condition` holds.
pub fn unless<B, V, C>(base: B, condition: C, then: V) -> When<B, V, C>
where
    B: Validate,
    V: Validate<Input = B::Input>,
    C: Fn(&B::Input) -> bool,
{
    When::unless(base, condition, then)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ValidateExt, codes};
    use crate::validators::{int, string};

    #[test]
    fn test_when_condition_true() {
        let validator = when(int().positive(), |n: &i32| *n > 100, int().multiple_of(10));
        assert!(validator.validate(&120).is_valid());
        assert_eq!(
            validator.validate(&125).error_message(),
            Some("must be a multiple of 10")
        );
    }

    #[test]
    fn test_when_condition_false_skips_then() {
        let validator = when(int().positive(), |n: &i32| *n > 100, int().multiple_of(10));
        assert!(validator.validate(&7).is_valid());
    }

    #[test]
    fn test_base_always_runs() {
        let validator = when(int().positive(), |_: &i32| false, int().zero());
        assert_eq!(validator.validate(&-3).error_message(), Some("must be positive"));
    }

    #[test]
    fn test_unless_inverts_condition() {
        let validator = unless(string(), |s: &str| s.starts_with('#'), string().alphanumeric());
        assert!(validator.validate("#comment!").is_valid());
        assert!(!validator.validate("plain!").is_valid());
    }

    #[test]
    fn test_null_skips_condition() {
        let validator = string().not_null().when(|_: &str| panic!("not called"), string().url());
        assert_eq!(validator.validate_nullable(None).error_count(), 1);
    }

    #[test]
    fn test_condition_panic_is_reported() {
        let validator = when(string(), |_: &str| panic!("bad condition"), string());
        let result = validator.validate("x");
        assert_eq!(result.errors()[0].code(), Some(codes::CUSTOM_FAULT));
    }
}
