//! Boolean validator

use crate::foundation::{
    Rule, RuleBuilder, RuleSet, Validate, ValidationError, ValidationResult, codes,
};

/// Validates `bool` values.
#[derive(Debug, Clone, Default)]
pub struct BoolValidator {
    rules: RuleSet<bool>,
}

impl BoolValidator {
    /// A validator without rules.
    pub fn new() -> Self {
        Self::default()
    }

    fn expect(mut self, expected: bool, error: ValidationError) -> Self {
        self.rules
            .push(Rule::predicate(move |value: &bool| *value == expected, error));
        self
    }

    /// Fails for a null value.
    pub fn not_null(mut self) -> Self {
        self.rules.push(Rule::not_null());
        self
    }

    /// Requires `true`.
    pub fn is_true(self) -> Self {
        self.expect(
            true,
            ValidationError::new("must be true").with_code(codes::IS_TRUE),
        )
    }

    /// Requires `false`.
    pub fn is_false(self) -> Self {
        self.expect(
            false,
            ValidationError::new("must be false").with_code(codes::IS_FALSE),
        )
    }

    /// Requires the value to equal `expected`.
    pub fn equal(self, expected: bool) -> Self {
        self.expect(
            expected,
            ValidationError::new(format!("must be equal to {expected}"))
                .with_code(codes::EQUAL)
                .with_param("expected", expected.to_string()),
        )
    }
}

impl RuleBuilder for BoolValidator {
    type Target = bool;

    fn rules_mut(&mut self) -> &mut RuleSet<bool> {
        &mut self.rules
    }
}

impl Validate for BoolValidator {
    type Input = bool;

    fn check(&self, input: Option<&bool>) -> ValidationResult {
        self.rules.run(input)
    }
}

/// Creates an empty [`BoolValidator`].
pub fn boolean() -> BoolValidator {
    BoolValidator::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(boolean().is_true().validate(&true).is_valid());
        assert_eq!(
            boolean().is_true().validate(&false).error_message(),
            Some("must be true")
        );
    }

    #[test]
    fn test_is_false() {
        assert!(boolean().is_false().validate(&false).is_valid());
        assert!(!boolean().is_false().validate(&true).is_valid());
    }

    #[test]
    fn test_equal() {
        assert!(boolean().equal(false).validate(&false).is_valid());
        assert!(!boolean().equal(false).validate(&true).is_valid());
    }

    #[test]
    fn test_null() {
        assert!(boolean().is_true().validate_nullable(None).is_valid());
        assert!(!boolean().not_null().validate_nullable(None).is_valid());
    }
}
