//! Error types for validation failures
//!
//! This module provides the structured error produced by every rule, plus the
//! error raised when a validator itself is configured incorrectly.
//!
//! All static string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes and messages.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

// ============================================================================
// ERROR CODES
// ============================================================================

/// Error codes attached by the built-in rules.
///
/// Codes are stable identifiers intended for programmatic handling; messages
/// are for humans and may change.
pub mod codes {
    pub const NOT_NULL: &str = "not_null";
    pub const NOT_EMPTY: &str = "not_empty";
    pub const NOT_BLANK: &str = "not_blank";
    pub const MIN_LENGTH: &str = "min_length";
    pub const MAX_LENGTH: &str = "max_length";
    pub const EXACT_LENGTH: &str = "exact_length";
    pub const LENGTH_RANGE: &str = "length_range";
    pub const PATTERN: &str = "pattern";
    pub const CONTAINS: &str = "contains";
    pub const NOT_CONTAINS: &str = "not_contains";
    pub const STARTS_WITH: &str = "starts_with";
    pub const ENDS_WITH: &str = "ends_with";
    pub const EMAIL: &str = "email";
    pub const URL: &str = "url";
    pub const GUID: &str = "guid";
    pub const ONE_OF: &str = "one_of";
    pub const NOT_ONE_OF: &str = "not_one_of";
    pub const ALPHANUMERIC: &str = "alphanumeric";
    pub const LOWERCASE: &str = "lowercase";
    pub const UPPERCASE: &str = "uppercase";
    pub const EQUAL: &str = "equal";
    pub const NOT_EQUAL: &str = "not_equal";
    pub const GREATER_THAN: &str = "greater_than";
    pub const GREATER_THAN_OR_EQUAL: &str = "greater_than_or_equal";
    pub const LESS_THAN: &str = "less_than";
    pub const LESS_THAN_OR_EQUAL: &str = "less_than_or_equal";
    pub const RANGE: &str = "range";
    pub const EXCLUSIVE_RANGE: &str = "exclusive_range";
    pub const POSITIVE: &str = "positive";
    pub const NEGATIVE: &str = "negative";
    pub const ZERO: &str = "zero";
    pub const NON_ZERO: &str = "non_zero";
    pub const MULTIPLE_OF: &str = "multiple_of";
    pub const FINITE: &str = "finite";
    pub const IS_TRUE: &str = "is_true";
    pub const IS_FALSE: &str = "is_false";
    pub const BEFORE: &str = "before";
    pub const AFTER: &str = "after";
    pub const ON_OR_BEFORE: &str = "on_or_before";
    pub const ON_OR_AFTER: &str = "on_or_after";
    pub const IN_PAST: &str = "in_past";
    pub const IN_FUTURE: &str = "in_future";
    pub const WEEKDAY: &str = "weekday";
    pub const WEEKEND: &str = "weekend";
    pub const WITHIN: &str = "within";
    pub const HAS_FLAG: &str = "has_flag";
    pub const HAS_ANY_FLAG: &str = "has_any_flag";
    pub const HAS_NO_FLAG: &str = "has_no_flag";
    pub const ONLY_FLAGS: &str = "only_flags";
    pub const DEFINED_FLAGS: &str = "defined_flags";
    pub const MIN_COUNT: &str = "min_count";
    pub const MAX_COUNT: &str = "max_count";
    pub const EXACT_COUNT: &str = "exact_count";
    pub const COUNT_RANGE: &str = "count_range";
    pub const UNIQUE: &str = "unique";
    pub const ALL: &str = "all";
    pub const ANY: &str = "any";
    pub const PREDICATE: &str = "predicate";
    pub const NOT: &str = "not";
    pub const TYPE_MISMATCH: &str = "type_mismatch";
    pub const UNION_MISMATCH: &str = "union_mismatch";
    pub const TRANSFORM_FAILED: &str = "transform_failed";
    pub const CUSTOM_FAULT: &str = "custom_fault";
    pub const VALIDATION_FAULT: &str = "validation_fault";
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// One rule violation.
///
/// Carries a human-readable message, an optional stable code, an optional
/// property name and path locating the violation inside a larger structure,
/// ordered template parameters, and arbitrary JSON context.
///
/// The effective [`property_path`](Self::property_path) falls back to the
/// property name when no explicit path was set. Equality is structural over
/// message, name, effective path and code; parameters and context are
/// informational and do not take part.
///
/// # Examples
///
/// ```
/// use tessera_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("must be at least 5 characters long")
///     .with_code("min_length")
///     .with_property("Name")
///     .with_param("min", "5");
///
/// assert_eq!(error.property_path(), Some("Name"));
/// assert_eq!(error.param("min"), Some("5"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    message: Cow<'static, str>,
    code: Option<Cow<'static, str>>,
    property_name: Option<Cow<'static, str>>,
    property_path: Option<String>,
    params: Params,
    context: Option<serde_json::Value>,
}

impl ValidationError {
    /// Creates a new validation error with a message and nothing else.
    ///
    /// ```
    /// use tessera_validator::foundation::ValidationError;
    ///
    /// // Static strings — zero allocation:
    /// let error = ValidationError::new("value cannot be null");
    ///
    /// // Dynamic strings — allocates only when needed:
    /// let error = ValidationError::new(format!("must be at least {} characters", 5));
    /// ```
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            code: None,
            property_name: None,
            property_path: None,
            params: SmallVec::new(),
            context: None,
        }
    }

    /// Sets the error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Replaces the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the property name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    /// Sets an explicit property path, overriding the name-derived default.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    /// Adds a template parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Attaches arbitrary context.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the property name, if any.
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    /// Returns the property path, falling back to the property name.
    #[must_use]
    pub fn property_path(&self) -> Option<&str> {
        self.property_path
            .as_deref()
            .or(self.property_name.as_deref())
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns all parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Returns the attached context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&serde_json::Value> {
        self.context.as_ref()
    }

    /// Nests this error under `prefix`.
    ///
    /// The new path is `prefix` when the error has no path yet, otherwise
    /// `prefix.path`.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_under(self, prefix: &str) -> Self {
        let path = match self.property_path() {
            Some(inner) => format!("{prefix}.{inner}"),
            None => prefix.to_owned(),
        };
        self.with_path(path)
    }

    /// Converts the error to a JSON structure for reporting.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "message": self.message,
            "code": self.code,
            "property_name": self.property_name,
            "property_path": self.property_path(),
            "params": params,
            "context": self.context,
        })
    }
}

/// Serializes the same shape as [`ValidationError::to_json_value`], with the
/// effective property path.
impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.property_name == other.property_name
            && self.property_path() == other.property_path()
            && self.code == other.code
    }
}

impl Eq for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.property_path() {
            write!(f, "[{path}] ")?;
        }
        match &self.code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "not_null" error.
    pub fn required() -> Self {
        Self::new("value cannot be null").with_code(codes::NOT_NULL)
    }

    /// Creates a "type_mismatch" error for a value that is not an `expected`.
    pub fn type_mismatch(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new(format!("expected a value of type {expected}"))
            .with_code(codes::TYPE_MISMATCH)
            .with_param("expected", expected)
    }

    /// Creates a "range" error.
    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new(format!("value must be between {min} and {max}"))
            .with_code(codes::RANGE)
            .with_param("min", min.to_string())
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates the error reported when user-supplied code faults mid-validation.
    pub fn custom_fault(detail: impl fmt::Display) -> Self {
        Self::new(format!("custom validation failed: {detail}")).with_code(codes::CUSTOM_FAULT)
    }
}

// ============================================================================
// BUILD ERROR
// ============================================================================

/// A validator was configured incorrectly.
///
/// This is a bug in the code building the validator, never a problem with the
/// data being validated. Chaining builder methods panic with the same message;
/// the `try_*` constructors return it instead.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A union was built without candidates.
    #[error("union validator requires at least one candidate")]
    EmptyUnion,

    /// A pattern failed to compile.
    #[error("invalid regular expression `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A range whose lower bound exceeds its upper bound.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },

    /// A membership rule without any allowed values.
    #[error("`{rule}` requires at least one value")]
    EmptyChoices { rule: &'static str },
}

impl BuildError {
    pub(crate) fn invalid_range(min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
