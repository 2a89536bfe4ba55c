//! OR combinator - logical disjunction of validators
//!
//! [`Or`] tries two validators and [`AnyOf`] tries a list of them. The first
//! success wins and later alternatives are not run. When every alternative
//! fails, all their errors are combined in order.
//!
//! Alternatives share one input type. For alternatives over different
//! types, see [`UnionValidator`](crate::validators::UnionValidator).
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! let validator = string().exact_length(5).or(string().exact_length(10));
//! assert!(validator.validate("hello").is_valid());
//! assert!(validator.validate("helloworld").is_valid());
//! assert_eq!(validator.validate("hi").error_count(), 2);
//! ```

use std::fmt;

use crate::foundation::{SharedValidator, Validate, ValidationResult};

/// Combines two validators with logical OR.
///
/// # Type Parameters
///
/// * `L` - The left (first) validator type
/// * `R` - The right (second) validator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Or<L, R> {
    pub(crate) left: L,
    pub(crate) right: R,
}

impl<L, R> Or<L, R> {
    /// Creates a new `Or` combinator.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Returns a reference to the left validator.
    pub fn left(&self) -> &L {
        &self.left
    }

    /// Returns a reference to the right validator.
    pub fn right(&self) -> &R {
        &self.right
    }

    /// Extracts the left and right validators.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Validate for Or<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        let left = self.left.validate_nullable(input);
        if left.is_valid() {
            return left;
        }
        let right = self.right.validate_nullable(input);
        if right.is_valid() {
            return right;
        }
        left.and(right)
    }
}

/// Creates an `Or` combinator from two validators.
pub fn or<L, R>(left: L, right: R) -> Or<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    Or::new(left, right)
}

// ============================================================================
// ANY OF
// ============================================================================

/// Tries validators in order until one succeeds.
///
/// An empty list always succeeds, mirroring [`All`](super::and::All).
pub struct AnyOf<I: ?Sized> {
    validators: Vec<SharedValidator<I>>,
}

impl<I: ?Sized> AnyOf<I> {
    /// Creates the combinator.
    pub fn new(validators: Vec<SharedValidator<I>>) -> Self {
        Self { validators }
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<I: ?Sized> Clone for AnyOf<I> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<I: ?Sized> fmt::Debug for AnyOf<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyOf")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<I: ?Sized> Validate for AnyOf<I> {
    type Input = I;

    fn check(&self, input: Option<&I>) -> ValidationResult {
        let mut failures = ValidationResult::success();
        for validator in &self.validators {
            let result = validator.validate_nullable(input);
            if result.is_valid() {
                return result;
            }
            failures.merge(result);
        }
        failures
    }
}

/// Creates an [`AnyOf`] combinator.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let port_or_zero = any(vec![int().zero().shared(), int().between(1024, 65535).shared()]);
/// assert!(port_or_zero.validate(&0).is_valid());
/// assert!(port_or_zero.validate(&8080).is_valid());
/// assert!(!port_or_zero.validate(&80).is_valid());
/// ```
#[must_use]
pub fn any<I: ?Sized>(validators: Vec<SharedValidator<I>>) -> AnyOf<I> {
    AnyOf::new(validators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{RuleBuilder, ValidateExt, ValidationError};
    use crate::validators::{int, string};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_or_left_wins() {
        let validator = Or::new(string().exact_length(3), string().exact_length(5));
        assert!(validator.validate("abc").is_valid());
        assert!(validator.validate("abcde").is_valid());
    }

    #[test]
    fn test_or_combines_errors_when_both_fail() {
        let validator = or(int().negative(), int().greater_than(100));
        let result = validator.validate(&50);
        let messages: Vec<_> = result.errors().iter().map(ValidationError::message).collect();
        assert_eq!(messages, ["must be negative", "must be greater than 100"]);
    }

    #[test]
    fn test_or_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let right = int().must(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            },
            "unused",
        );

        let validator = int().positive().or(right);
        assert!(validator.validate(&1).is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(validator.validate(&-1).is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_any_first_success_wins() {
        let validator = any(vec![
            string().email().shared(),
            string().url().shared(),
        ]);
        assert!(validator.validate("someone@example.com").is_valid());
        assert!(validator.validate("https://example.com").is_valid());
        assert_eq!(validator.validate("neither").error_count(), 2);
    }

    #[test]
    fn test_any_empty_is_valid() {
        let validator = any::<str>(Vec::new());
        assert!(validator.is_empty());
        assert!(validator.validate("x").is_valid());
    }
}
