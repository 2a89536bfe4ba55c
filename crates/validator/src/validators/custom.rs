//! Custom validator
//!
//! Wraps a caller-supplied function as a validator. The function only sees
//! present values; a null value passes unless `not_null` is added. Further
//! rules can be chained with [`RuleBuilder`] like on any other validator.

use std::fmt;

use crate::foundation::{Rule, RuleBuilder, RuleSet, Validate, ValidationResult};

/// A validator backed by a user function.
///
/// The function runs inside the fault guard: a panic becomes a single
/// `custom_fault` error.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let even = custom(|n: &i64| {
///     if n % 2 == 0 {
///         ValidationResult::success()
///     } else {
///         ValidationResult::failure("must be even")
///     }
/// });
///
/// assert!(even.validate(&4).is_valid());
/// assert_eq!(even.validate(&3).error_message(), Some("must be even"));
/// assert!(even.validate_nullable(None).is_valid());
/// ```
pub struct CustomValidator<T: ?Sized> {
    rules: RuleSet<T>,
}

impl<T: ?Sized + 'static> CustomValidator<T> {
    /// Wraps `check`.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        let mut rules = RuleSet::new();
        rules.push(Rule::new(move |input: Option<&T>| match input {
            Some(value) => check(value),
            None => ValidationResult::success(),
        }));
        Self { rules }
    }

    /// Fails for a null value.
    pub fn not_null(mut self) -> Self {
        self.rules.push(Rule::not_null());
        self
    }
}

impl<T: ?Sized> Clone for CustomValidator<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CustomValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidator")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<T: ?Sized> RuleBuilder for CustomValidator<T> {
    type Target = T;

    fn rules_mut(&mut self) -> &mut RuleSet<T> {
        &mut self.rules
    }
}

impl<T: ?Sized> Validate for CustomValidator<T> {
    type Input = T;

    fn check(&self, input: Option<&T>) -> ValidationResult {
        self.rules.run(input)
    }
}

/// Creates a [`CustomValidator`] from `check`.
pub fn custom<T, F>(check: F) -> CustomValidator<T>
where
    T: ?Sized + 'static,
    F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
{
    CustomValidator::new(check)
}
