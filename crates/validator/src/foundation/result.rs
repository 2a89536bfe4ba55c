//! Aggregated validation outcomes
//!
//! A [`ValidationResult`] is the ordered list of every error a validation run
//! produced. It has no separate validity flag: a result is valid exactly when
//! it holds no errors.

use std::fmt;

use serde::Serialize;

use super::error::ValidationError;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// The outcome of running a validator.
///
/// # Examples
///
/// ```
/// use tessera_validator::foundation::ValidationResult;
///
/// let ok = ValidationResult::success();
/// let bad = ValidationResult::failure_for("value cannot be null", "Name");
///
/// let combined = ok.and(bad);
/// assert!(!combined.is_valid());
/// assert_eq!(combined.error_message(), Some("value cannot be null"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A result without errors.
    #[must_use]
    pub const fn success() -> Self {
        Self { errors: Vec::new() }
    }

    /// A result holding one error with the given message.
    #[must_use]
    pub fn failure(message: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        Self::from_error(ValidationError::new(message))
    }

    /// A result holding one error attributed to `property_name`.
    #[must_use]
    pub fn failure_for(
        message: impl Into<std::borrow::Cow<'static, str>>,
        property_name: impl Into<std::borrow::Cow<'static, str>>,
    ) -> Self {
        Self::from_error(ValidationError::new(message).with_property(property_name))
    }

    /// A result holding exactly `error`.
    #[must_use]
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// A result holding the given errors in order. An empty list is success.
    #[must_use]
    pub fn from_errors(errors: impl IntoIterator<Item = ValidationError>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
        }
    }

    /// Concatenates the errors of every result, preserving order.
    pub fn combine(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        let mut errors = Vec::new();
        for result in results {
            errors.extend(result.errors);
        }
        Self { errors }
    }

    /// Shorthand for `combine([self, other])`.
    #[must_use]
    pub fn and(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self
    }

    /// Appends one error.
    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends every error of `other`.
    pub(crate) fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// `true` when there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The errors in production order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the result, returning its errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// The first error's message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.errors.first().map(ValidationError::message)
    }

    /// Number of errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Errors whose effective path is exactly `path`.
    pub fn errors_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |error| error.property_path() == Some(path))
    }

    /// Rewrites every error path as `prefix` or `prefix.path`.
    #[must_use]
    pub fn with_path_prefix(self, prefix: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|error| error.nested_under(prefix))
                .collect(),
        }
    }

    /// Nests every error under a property, filling the name where absent.
    #[must_use]
    pub(crate) fn for_property(self, name: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|error| {
                    let error = error.nested_under(name);
                    if error.property_name().is_some() {
                        error
                    } else {
                        error.with_property(name.to_owned())
                    }
                })
                .collect(),
        }
    }

    /// Converts into a `Result`, failing with a [`ValidationException`] when
    /// any error is present.
    pub fn into_result(self) -> Result<(), ValidationException> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationException::new(self))
        }
    }

    /// Converts the report to JSON.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "errors": self
                .errors
                .iter()
                .map(ValidationError::to_json_value)
                .collect::<Vec<_>>(),
        })
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        Self::from_error(error)
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(error) => Self::from_error(error),
        }
    }
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        Self::combine(iter)
    }
}

impl FromIterator<ValidationError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self::from_errors(iter)
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("valid");
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATION EXCEPTION
// ============================================================================

/// A failed [`ValidationResult`] surfaced as an error.
///
/// Produced by [`ValidateExt::validate_and_throw`](super::ValidateExt::validate_and_throw)
/// and [`ValidationResult::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.result))]
pub struct ValidationException {
    result: ValidationResult,
}

impl ValidationException {
    /// Wraps a result. Callers are expected to pass a failed one.
    pub fn new(result: ValidationResult) -> Self {
        Self { result }
    }

    /// The wrapped result.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// The wrapped errors.
    pub fn errors(&self) -> &[ValidationError] {
        self.result.errors()
    }

    /// Unwraps into the result.
    pub fn into_result(self) -> ValidationResult {
        self.result
    }
}

fn summarize(result: &ValidationResult) -> String {
    match result.errors() {
        [] => "Validation failed".to_owned(),
        [only] => format!("Validation failed: {}", only.message()),
        errors => {
            let joined = errors
                .iter()
                .map(ValidationError::message)
                .collect::<Vec<_>>()
                .join("; ");
            format!("Validation failed with {} errors: {joined}", errors.len())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
