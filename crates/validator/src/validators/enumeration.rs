//! Enum validator
//!
//! Works with any `PartialEq + Debug` type. Flag rules are available for
//! types generated by [`bitflags`].

use std::fmt;

use bitflags::Flags;

use crate::foundation::{
    BuildError, Rule, RuleBuilder, RuleSet, Validate, ValidationError, ValidationResult, codes,
};

/// Bounds every enum value must satisfy.
pub trait EnumValue: PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<E> EnumValue for E where E: PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Validates enum values.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// #[derive(Debug, PartialEq)]
/// enum Status { Draft, Published, Archived }
///
/// let editable = enumeration::<Status>().one_of([Status::Draft, Status::Published]);
/// assert!(editable.validate(&Status::Draft).is_valid());
/// assert_eq!(
///     editable.validate(&Status::Archived).error_message(),
///     Some("must be one of: Draft, Published")
/// );
/// ```
pub struct EnumValidator<E: EnumValue> {
    rules: RuleSet<E>,
}

impl<E: EnumValue> EnumValidator<E> {
    /// A validator without rules.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(),
        }
    }

    fn with_rule(mut self, rule: Rule<E>) -> Self {
        self.rules.push(rule);
        self
    }

    fn expect<P>(self, predicate: P, error: ValidationError) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.with_rule(Rule::new(move |input: Option<&E>| match input {
            Some(value) if !predicate(value) => error
                .clone()
                .with_param("actual", format!("{value:?}"))
                .into(),
            _ => ValidationResult::success(),
        }))
    }

    /// Fails for a null value.
    pub fn not_null(self) -> Self {
        self.with_rule(Rule::not_null())
    }

    /// Requires the value to equal `expected`.
    pub fn equal(self, expected: E) -> Self {
        let error = ValidationError::new(format!("must be equal to {expected:?}"))
            .with_code(codes::EQUAL)
            .with_param("expected", format!("{expected:?}"));
        self.expect(move |value| *value == expected, error)
    }

    /// Requires the value to differ from `unexpected`.
    pub fn not_equal(self, unexpected: E) -> Self {
        let error = ValidationError::new(format!("must not be equal to {unexpected:?}"))
            .with_code(codes::NOT_EQUAL)
            .with_param("unexpected", format!("{unexpected:?}"));
        self.expect(move |value| *value != unexpected, error)
    }

    /// Requires the value to be one of `allowed`.
    ///
    /// # Panics
    ///
    /// Panics if `allowed` is empty.
    pub fn one_of(self, allowed: impl IntoIterator<Item = E>) -> Self {
        let allowed = collect_choices(allowed, "one_of");
        let listed = list(&allowed);
        let error = ValidationError::new(format!("must be one of: {listed}"))
            .with_code(codes::ONE_OF)
            .with_param("allowed", listed);
        self.expect(move |value| allowed.contains(value), error)
    }

    /// Requires the value to be none of `forbidden`.
    ///
    /// # Panics
    ///
    /// Panics if `forbidden` is empty.
    pub fn not_one_of(self, forbidden: impl IntoIterator<Item = E>) -> Self {
        let forbidden = collect_choices(forbidden, "not_one_of");
        let listed = list(&forbidden);
        let error = ValidationError::new(format!("must not be one of: {listed}"))
            .with_code(codes::NOT_ONE_OF)
            .with_param("forbidden", listed);
        self.expect(move |value| !forbidden.contains(value), error)
    }
}

fn collect_choices<E>(values: impl IntoIterator<Item = E>, rule: &'static str) -> Vec<E> {
    let values: Vec<E> = values.into_iter().collect();
    assert!(!values.is_empty(), "{}", BuildError::EmptyChoices { rule });
    values
}

fn list<E: fmt::Debug>(values: &[E]) -> String {
    values
        .iter()
        .map(|value| format!("{value:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// FLAG RULES
// ============================================================================

impl<E> EnumValidator<E>
where
    E: EnumValue + Flags + Copy,
{
    /// Requires every bit of `flag` to be set.
    pub fn has_flag(self, flag: E) -> Self {
        let error = ValidationError::new(format!("must have flag {flag:?}"))
            .with_code(codes::HAS_FLAG)
            .with_param("flag", format!("{flag:?}"));
        self.expect(move |value| value.contains(flag), error)
    }

    /// Requires at least one bit of `flags` to be set.
    pub fn has_any_flag(self, flags: E) -> Self {
        let error = ValidationError::new(format!("must have any of the flags {flags:?}"))
            .with_code(codes::HAS_ANY_FLAG)
            .with_param("flags", format!("{flags:?}"));
        self.expect(move |value| value.intersects(flags), error)
    }

    /// Requires no bit of `flag` to be set.
    pub fn has_no_flag(self, flag: E) -> Self {
        let error = ValidationError::new(format!("must not have flag {flag:?}"))
            .with_code(codes::HAS_NO_FLAG)
            .with_param("flag", format!("{flag:?}"));
        self.expect(move |value| !value.intersects(flag), error)
    }

    /// Rejects any bit outside `allowed`.
    pub fn only_flags(self, allowed: E) -> Self {
        let error = ValidationError::new(format!("must only have flags within {allowed:?}"))
            .with_code(codes::ONLY_FLAGS)
            .with_param("allowed", format!("{allowed:?}"));
        self.expect(move |value| allowed.contains(*value), error)
    }

    /// Rejects bits that do not correspond to any declared flag.
    pub fn defined_flags(self) -> Self {
        self.expect(
            |value| E::from_bits(value.bits()).is_some(),
            ValidationError::new("must only contain defined flags")
                .with_code(codes::DEFINED_FLAGS),
        )
    }
}

impl<E: EnumValue> Default for EnumValidator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnumValue> Clone for EnumValidator<E> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<E: EnumValue> fmt::Debug for EnumValidator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumValidator")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<E: EnumValue> RuleBuilder for EnumValidator<E> {
    type Target = E;

    fn rules_mut(&mut self) -> &mut RuleSet<E> {
        &mut self.rules
    }
}

impl<E: EnumValue> Validate for EnumValidator<E> {
    type Input = E;

    fn check(&self, input: Option<&E>) -> ValidationResult {
        self.rules.run(input)
    }
}

/// Creates an empty [`EnumValidator`].
pub fn enumeration<E: EnumValue>() -> EnumValidator<E> {
    EnumValidator::new()
}
