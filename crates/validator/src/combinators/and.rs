//! AND combinator - logical conjunction of validators
//!
//! [`And`] runs two validators and [`All`] runs a list of them. Both are
//! exhaustive: every validator runs and every error is reported, in order.
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! let validator = string().min_length(5).and(string().lowercase());
//! assert!(validator.validate("hello").is_valid());
//! assert_eq!(validator.validate("Hi").error_count(), 2);
//! ```

use crate::foundation::{SharedValidator, Validate, ValidationResult};

/// Combines two validators with logical AND.
///
/// # Type Parameters
///
/// * `L` - The left (first) validator type
/// * `R` - The right (second) validator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    pub(crate) left: L,
    pub(crate) right: R,
}

impl<L, R> And<L, R> {
    /// Creates a new `And` combinator.
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

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        self.left
            .validate_nullable(input)
            .and(self.right.validate_nullable(input))
    }
}

/// Creates an `And` combinator from two validators.
pub fn and<L, R>(left: L, right: R) -> And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    And::new(left, right)
}

// ============================================================================
// ALL
// ============================================================================

/// Runs every validator in a list and combines their results.
///
/// An empty list always succeeds.
pub struct All<I: ?Sized> {
    validators: Vec<SharedValidator<I>>,
}

impl<I: ?Sized> All<I> {
    /// Creates the combinator.
    pub fn new(validators: Vec<SharedValidator<I>>) -> Self {
        Self { validators }
    }

    /// Number of combined validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<I: ?Sized> Clone for All<I> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<I: ?Sized> std::fmt::Debug for All<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("All")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<I: ?Sized> Validate for All<I> {
    type Input = I;

    fn check(&self, input: Option<&I>) -> ValidationResult {
        self.validators
            .iter()
            .map(|validator| validator.validate_nullable(input))
            .collect()
    }
}

/// Creates an [`All`] combinator.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let validator = all(vec![
///     string().min_length(3).shared(),
///     string().alphanumeric().shared(),
/// ]);
/// assert_eq!(validator.validate("a!").error_count(), 2);
/// ```
#[must_use]
pub fn all<I: ?Sized>(validators: Vec<SharedValidator<I>>) -> All<I> {
    All::new(validators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ValidateExt, ValidationError};
    use crate::validators::{int, string};
    use std::sync::Arc;

    fn messages(result: &ValidationResult) -> Vec<&str> {
        result.errors().iter().map(ValidationError::message).collect()
    }

    #[test]
    fn test_and_both_pass() {
        let validator = And::new(string().min_length(3), string().max_length(5));
        assert!(validator.validate("abcd").is_valid());
    }

    #[test]
    fn test_and_reports_both_sides() {
        let validator = and(int().positive(), int().greater_than(10));
        let result = validator.validate(&-1);
        assert_eq!(messages(&result), ["must be positive", "must be greater than 10"]);
    }

    #[test]
    fn test_and_chain() {
        let validator = string()
            .min_length(2)
            .and(string().max_length(4))
            .and(string().lowercase());
        assert!(validator.validate("abc").is_valid());
        assert_eq!(validator.validate("ABCDEF").error_count(), 2);
    }

    #[test]
    fn test_and_passes_null_through() {
        let validator = string().min_length(3).and(string().not_null());
        assert_eq!(validator.validate_nullable(None).error_count(), 1);
    }

    #[test]
    fn test_all_empty_is_valid() {
        assert!(all::<i32>(Vec::new()).validate(&0).is_valid());
    }

    #[test]
    fn test_all_keeps_order() {
        let validators: Vec<SharedValidator<i32>> = vec![
            Arc::new(int().less_than(0)),
            Arc::new(int().not_equal(5)),
            int().zero().shared(),
        ];
        let validator = all(validators);
        assert_eq!(validator.len(), 3);
        let result = validator.validate(&5);
        assert_eq!(
            messages(&result),
            ["must be less than 0", "must not be equal to 5", "must be zero"]
        );
    }
}
