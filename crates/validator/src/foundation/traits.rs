//! Core traits for the validation system
//!
//! [`Validate`] is the three-phase pipeline every validator implements.
//! [`ValidateExt`] is blanket-implemented on top of it and provides the
//! execution helpers and the fluent combinator methods.

use std::borrow::{Borrow, Cow};
use std::sync::Arc;

use super::error::{ValidationError, codes};
use super::guard::guarded;
use super::result::{ValidationException, ValidationResult};

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all validators must implement.
///
/// Validation runs in three phases. [`pre_check`](Self::pre_check) may reject
/// the input outright, in which case [`check`](Self::check) is skipped.
/// [`post_check`](Self::post_check) sees the combined result and may amend
/// it. Only `check` is required.
///
/// `None` stands for a null or absent value. Every validator accepts it;
/// whether it is an error depends on the rules (`not_null`).
///
/// # Type Parameters
///
/// * `Input` - The type being validated (can be `?Sized` for DSTs like `str`)
///
/// # Examples
///
/// ```
/// use tessera_validator::foundation::{Validate, ValidationResult};
///
/// struct Even;
///
/// impl Validate for Even {
///     type Input = i64;
///
///     fn check(&self, input: Option<&i64>) -> ValidationResult {
///         match input {
///             Some(n) if n % 2 != 0 => ValidationResult::failure("must be even"),
///             _ => ValidationResult::success(),
///         }
///     }
/// }
///
/// assert!(Even.validate(&4).is_valid());
/// assert!(!Even.validate(&3).is_valid());
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str` and `[T]`.
    type Input: ?Sized;

    /// Runs before the rules. A failure here is returned as-is.
    fn pre_check(&self, _input: Option<&Self::Input>) -> ValidationResult {
        ValidationResult::success()
    }

    /// Runs the rules.
    fn check(&self, input: Option<&Self::Input>) -> ValidationResult;

    /// Runs after the rules with their combined result.
    fn post_check(&self, _input: Option<&Self::Input>, result: ValidationResult) -> ValidationResult {
        result
    }

    /// Validates a possibly-null value through all three phases.
    fn validate_nullable(&self, input: Option<&Self::Input>) -> ValidationResult {
        let pre = self.pre_check(input);
        if !pre.is_valid() {
            return pre;
        }
        let result = self.check(input);
        self.post_check(input, result)
    }

    /// Validates a present value.
    fn validate(&self, input: &Self::Input) -> ValidationResult {
        self.validate_nullable(Some(input))
    }
}

macro_rules! forward_validate {
    ($($wrapper:ty),+) => {
        $(
            impl<V: Validate + ?Sized> Validate for $wrapper {
                type Input = V::Input;

                fn pre_check(&self, input: Option<&Self::Input>) -> ValidationResult {
                    (**self).pre_check(input)
                }

                fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
                    (**self).check(input)
                }

                fn post_check(
                    &self,
                    input: Option<&Self::Input>,
                    result: ValidationResult,
                ) -> ValidationResult {
                    (**self).post_check(input, result)
                }

                fn validate_nullable(&self, input: Option<&Self::Input>) -> ValidationResult {
                    (**self).validate_nullable(input)
                }
            }
        )+
    };
}

forward_validate!(&V, Box<V>, Arc<V>);

/// A type-erased validator that can be shared across threads.
pub type SharedValidator<I> = Arc<dyn Validate<Input = I> + Send + Sync>;

/// A type-erased, uniquely owned validator.
pub type BoxedValidator<I> = Box<dyn Validate<Input = I> + Send + Sync>;

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension trait providing execution helpers and combinator methods.
///
/// This trait is automatically implemented for all types that implement
/// `Validate`.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let code = string().exact_length(3).or(string().exact_length(5));
/// assert!(code.validate("abc").is_valid());
/// assert!(code.validate("abcde").is_valid());
/// assert!(!code.validate("abcd").is_valid());
/// ```
pub trait ValidateExt: Validate + Sized {
    /// Validates and returns the input back, or the failed result as an error.
    fn validate_and_throw<'a>(
        &self,
        input: &'a Self::Input,
    ) -> Result<&'a Self::Input, ValidationException> {
        let result = self.validate(input);
        if result.is_valid() {
            Ok(input)
        } else {
            tracing::debug!(errors = result.error_count(), "validation failed");
            Err(ValidationException::new(result))
        }
    }

    /// Validates without ever panicking.
    ///
    /// Any fault escaping the validator becomes a single `validation_fault`
    /// error.
    fn try_validate(&self, input: &Self::Input) -> (bool, ValidationResult) {
        let result = match guarded(|| self.validate(input)) {
            Ok(result) => result,
            Err(fault) => {
                tracing::warn!(fault = %fault, "validator faulted");
                ValidationError::new(format!("validation could not be completed: {fault}"))
                    .with_code(codes::VALIDATION_FAULT)
                    .into()
            }
        };
        (result.is_valid(), result)
    }

    /// Combines two validators; every error of both is reported.
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }

    /// Succeeds when either validator succeeds.
    ///
    /// `other` is not run once `self` succeeds; when both fail their errors
    /// are combined.
    fn or<V>(self, other: V) -> Or<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        Or::new(self, other)
    }

    /// Inverts the validator, failing with `message` when it succeeds.
    fn not(self, message: impl Into<Cow<'static, str>>) -> Not<Self> {
        Not::new(self, message)
    }

    /// Runs `then` in addition to `self` when `condition` holds.
    fn when<V, C>(self, condition: C, then: V) -> When<Self, V, C>
    where
        V: Validate<Input = Self::Input>,
        C: Fn(&Self::Input) -> bool,
    {
        When::new(self, condition, then)
    }

    /// Runs `then` in addition to `self` unless `condition` holds.
    fn unless<V, C>(self, condition: C, then: V) -> When<Self, V, C>
    where
        V: Validate<Input = Self::Input>,
        C: Fn(&Self::Input) -> bool,
    {
        When::unless(self, condition, then)
    }

    /// Replaces every error with one carrying `message`.
    fn with_message(self, message: impl Into<Cow<'static, str>>) -> WithMessage<Self> {
        WithMessage::new(self, message)
    }

    /// Replaces every error with one whose message is computed from the input
    /// and the original result.
    fn with_message_fn<F>(self, message: F) -> WithMessageFn<Self, F>
    where
        F: Fn(Option<&Self::Input>, &ValidationResult) -> String,
    {
        WithMessageFn::new(self, message)
    }

    /// Replaces the code of every error, keeping messages.
    fn with_code(self, code: impl Into<Cow<'static, str>>) -> WithCode<Self> {
        WithCode::new(self, code)
    }

    /// Treats a null value as valid without running the validator.
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Adapts the validator to `Option<T>` inputs.
    fn nullable<T>(self) -> Nullable<Self, T>
    where
        T: Borrow<Self::Input>,
    {
        Nullable::new(self)
    }

    /// Erases the type behind an `Arc`.
    fn shared(self) -> SharedValidator<Self::Input>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }

    /// Erases the type behind a `Box`.
    fn boxed(self) -> BoxedValidator<Self::Input>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<T: Validate> ValidateExt for T {}

// ============================================================================
// IMPORT COMBINATOR TYPES
// ============================================================================

pub use crate::combinators::and::And;
pub use crate::combinators::message::{WithCode, WithMessage, WithMessageFn};
pub use crate::combinators::not::Not;
pub use crate::combinators::optional::{Nullable, Optional};
pub use crate::combinators::or::Or;
pub use crate::combinators::when::When;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct MinLen(usize);

    impl Validate for MinLen {
        type Input = str;

        fn check(&self, input: Option<&str>) -> ValidationResult {
            match input {
                Some(s) if s.len() < self.0 => ValidationResult::failure("too short"),
                _ => ValidationResult::success(),
            }
        }
    }

    struct RejectEmpty;

    impl Validate for RejectEmpty {
        type Input = str;

        fn pre_check(&self, input: Option<&str>) -> ValidationResult {
            match input {
                Some("") => ValidationResult::failure("empty"),
                _ => ValidationResult::success(),
            }
        }

        fn check(&self, _input: Option<&str>) -> ValidationResult {
            ValidationResult::failure("checked")
        }

        fn post_check(&self, _input: Option<&str>, result: ValidationResult) -> ValidationResult {
            result.and(ValidationResult::failure("post"))
        }
    }

    struct Explodes;

    impl Validate for Explodes {
        type Input = str;

        fn check(&self, _input: Option<&str>) -> ValidationResult {
            panic!("validator bug")
        }
    }

    #[test]
    fn test_validate_wraps_some() {
        assert!(MinLen(3).validate("abc").is_valid());
        assert!(!MinLen(3).validate("ab").is_valid());
        assert!(MinLen(3).validate_nullable(None).is_valid());
    }

    #[test]
    fn test_pre_check_short_circuits() {
        let result = RejectEmpty.validate("");
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.error_message(), Some("empty"));
    }

    #[test]
    fn test_post_check_sees_result() {
        let result = RejectEmpty.validate("x");
        let messages: Vec<_> = result.errors().iter().map(ValidationError::message).collect();
        assert_eq!(messages, ["checked", "post"]);
    }

    #[test]
    fn test_wrappers_forward_phases() {
        let boxed: Box<RejectEmpty> = Box::new(RejectEmpty);
        assert_eq!(boxed.validate("").error_message(), Some("empty"));

        let shared: SharedValidator<str> = Arc::new(RejectEmpty);
        assert_eq!(shared.validate("x").error_count(), 2);

        let by_ref = &MinLen(2);
        assert!(!by_ref.validate("a").is_valid());
    }

    #[test]
    fn test_validate_and_throw() {
        let validator = MinLen(3);
        assert_eq!(validator.validate_and_throw("abcd").unwrap(), "abcd");

        let error = validator.validate_and_throw("a").unwrap_err();
        assert_eq!(error.to_string(), "Validation failed: too short");
    }

    #[test]
    fn test_try_validate_reports_outcome() {
        let (valid, result) = MinLen(3).try_validate("a");
        assert!(!valid);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_try_validate_never_panics() {
        let (valid, result) = Explodes.try_validate("x");
        assert!(!valid);
        assert_eq!(result.errors()[0].code(), Some(codes::VALIDATION_FAULT));
        assert_eq!(
            result.error_message(),
            Some("validation could not be completed: validator bug")
        );
    }
}
