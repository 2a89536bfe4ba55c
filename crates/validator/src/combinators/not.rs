//! NOT combinator - logical negation of a validator
//!
//! [`Not`] succeeds when the inner validator fails and fails with a fixed
//! message when it succeeds.
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! let no_admin = string().contains("admin").not("must not mention admin");
//! assert!(no_admin.validate("guest").is_valid());
//! assert_eq!(
//!     no_admin.validate("superadmin").error_message(),
//!     Some("must not mention admin")
//! );
//! ```

use std::borrow::Cow;

use crate::foundation::{Validate, ValidationError, ValidationResult, codes};

/// Inverts a validator.
#[derive(Debug, Clone)]
pub struct Not<V> {
    pub(crate) inner: V,
    message: Cow<'static, str>,
}

impl<V> Not<V> {
    /// Creates a new `Not` combinator failing with `message`.
    pub fn new(inner: V, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Extracts the inner validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validate> Validate for Not<V> {
    type Input = V::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        if self.inner.validate_nullable(input).is_valid() {
            ValidationError::new(self.message.clone())
                .with_code(codes::NOT)
                .into()
        } else {
            ValidationResult::success()
        }
    }
}

/// Creates a `Not` combinator.
pub fn not<V: Validate>(validator: V, message: impl Into<Cow<'static, str>>) -> Not<V> {
    Not::new(validator, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{int, string};

    #[test]
    fn test_not_inverts() {
        let validator = not(int().between(1, 9), "must not be a single digit");
        assert!(validator.validate(&10).is_valid());

        let result = validator.validate(&5);
        assert_eq!(result.error_message(), Some("must not be a single digit"));
        assert_eq!(result.errors()[0].code(), Some(codes::NOT));
    }

    #[test]
    fn test_not_of_null() {
        let validator = not(string().not_null(), "must be absent");
        assert!(validator.validate_nullable(None).is_valid());
        assert!(!validator.validate("present").is_valid());
    }

    #[test]
    fn test_double_negation() {
        let validator = not(not(string().min_length(3), "inner"), "outer");
        assert!(validator.validate("abc").is_valid());
        assert_eq!(validator.validate("ab").error_message(), Some("outer"));
    }
}
