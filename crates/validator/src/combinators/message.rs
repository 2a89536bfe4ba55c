//! MESSAGE combinator - custom error messages
//!
//! [`WithMessage`] and [`WithMessageFn`] collapse a failed result into a
//! single error with a caller-chosen message. The first original error's
//! path, code and params are kept. [`WithCode`] rewrites only the codes.

use std::borrow::Cow;

use crate::foundation::guard::guarded;
use crate::foundation::{Validate, ValidationError, ValidationResult};

fn collapse(result: ValidationResult, message: Cow<'static, str>) -> ValidationResult {
    match result.into_errors().into_iter().next() {
        Some(first) => first.with_message(message).into(),
        None => ValidationResult::success(),
    }
}

// ============================================================================
// WITH MESSAGE COMBINATOR
// ============================================================================

/// Replaces the errors of a validator with one fixed message.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let password = string()
///     .min_length(8)
///     .must(|s| s.chars().any(|c| c.is_ascii_digit()), "needs a digit")
///     .with_message("password is too weak");
///
/// let result = password.validate("short");
/// assert_eq!(result.error_count(), 1);
/// assert_eq!(result.error_message(), Some("password is too weak"));
/// ```
#[derive(Debug, Clone)]
pub struct WithMessage<V> {
    inner: V,
    message: Cow<'static, str>,
}

impl<V> WithMessage<V> {
    /// Creates a new `WithMessage` combinator.
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

    /// Returns the custom message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Extracts the inner validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validate> Validate for WithMessage<V> {
    type Input = V::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        collapse(self.inner.validate_nullable(input), self.message.clone())
    }
}

/// Creates a `WithMessage` combinator.
pub fn with_message<V: Validate>(
    validator: V,
    message: impl Into<Cow<'static, str>>,
) -> WithMessage<V> {
    WithMessage::new(validator, message)
}

// ============================================================================
// WITH MESSAGE FN COMBINATOR
// ============================================================================

/// Replaces the errors of a validator with one computed message.
///
/// The function receives the input and the original failed result. It is
/// not called on success. A panic inside it becomes a `custom_fault` error.
#[derive(Clone)]
pub struct WithMessageFn<V, F> {
    inner: V,
    message: F,
}

impl<V, F> WithMessageFn<V, F> {
    /// Creates a new `WithMessageFn` combinator.
    pub fn new(inner: V, message: F) -> Self {
        Self { inner, message }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Extracts the inner validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: std::fmt::Debug, F> std::fmt::Debug for WithMessageFn<V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithMessageFn")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<V, F> Validate for WithMessageFn<V, F>
where
    V: Validate,
    F: Fn(Option<&V::Input>, &ValidationResult) -> String,
{
    type Input = V::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        let result = self.inner.validate_nullable(input);
        if result.is_valid() {
            return result;
        }
        match guarded(|| (self.message)(input, &result)) {
            Ok(message) => collapse(result, Cow::Owned(message)),
            Err(fault) => {
                tracing::warn!(fault = %fault, "message function faulted during validation");
                ValidationError::custom_fault(fault).into()
            }
        }
    }
}

/// Creates a `WithMessageFn` combinator.
pub fn with_message_fn<V, F>(validator: V, message: F) -> WithMessageFn<V, F>
where
    V: Validate,
    F: Fn(Option<&V::Input>, &ValidationResult) -> String,
{
    WithMessageFn::new(validator, message)
}

// ============================================================================
// WITH CODE COMBINATOR
// ============================================================================

/// Replaces the code of every error, keeping messages and paths.
#[derive(Debug, Clone)]
pub struct WithCode<V> {
    inner: V,
    code: Cow<'static, str>,
}

impl<V> WithCode<V> {
    /// Creates a new `WithCode` combinator.
    pub fn new(inner: V, code: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            code: code.into(),
        }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Returns the replacement code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Extracts the inner validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validate> Validate for WithCode<V> {
    type Input = V::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        self.inner
            .validate_nullable(input)
            .into_iter()
            .map(|error| error.with_code(self.code.clone()))
            .collect()
    }
}

/// Creates a `WithCode` combinator.
pub fn with_code<V: Validate>(validator: V, code: impl Into<Cow<'static, str>>) -> WithCode<V> {
    WithCode::new(validator, code)
}

// ============================================================================
// TESTS
// ============================================================================
