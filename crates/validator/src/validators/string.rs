//! String validator
//!
//! Length and format rules only inspect non-empty values: a null or empty
//! string passes them, leaving that case to `not_null`, `not_empty` and
//! `not_blank`. Lengths count Unicode scalar values.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{
    BuildError, Rule, RuleBuilder, RuleSet, Validate, ValidationError, ValidationResult, codes,
};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .unwrap()
});

/// Builds a rule that runs `check` on non-empty strings only.
fn on_content<F>(check: F) -> Rule<str>
where
    F: Fn(&str) -> Option<ValidationError> + Send + Sync + 'static,
{
    Rule::new(move |input: Option<&str>| match input {
        Some(value) if !value.is_empty() => check(value).into_iter().collect(),
        _ => ValidationResult::success(),
    })
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}

// ============================================================================
// STRING VALIDATOR
// ============================================================================

/// Validates `str` values.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let username = string().not_empty().min_length(3).max_length(16).alphanumeric();
///
/// assert!(username.validate("alice42").is_valid());
/// assert_eq!(username.validate("").error_count(), 1);
/// assert_eq!(
///     username.validate("al").error_message(),
///     Some("must be at least 3 characters long")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    rules: RuleSet<str>,
}

impl StringValidator {
    /// A validator without rules.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rule(mut self, rule: Rule<str>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Fails for a null value.
    pub fn not_null(self) -> Self {
        self.with_rule(Rule::not_null())
    }

    /// Fails for a null or empty value.
    pub fn not_empty(self) -> Self {
        self.with_rule(Rule::new(|input: Option<&str>| match input {
            Some(value) if !value.is_empty() => ValidationResult::success(),
            _ => ValidationError::new("value cannot be null or empty")
                .with_code(codes::NOT_EMPTY)
                .into(),
        }))
    }

    /// Fails for a null value or one made only of whitespace.
    pub fn not_blank(self) -> Self {
        self.with_rule(Rule::new(|input: Option<&str>| match input {
            Some(value) if !value.trim().is_empty() => ValidationResult::success(),
            _ => ValidationError::new("value cannot be blank")
                .with_code(codes::NOT_BLANK)
                .into(),
        }))
    }

    /// Requires at least `min` characters.
    pub fn min_length(self, min: usize) -> Self {
        self.with_rule(on_content(move |value| {
            let actual = char_count(value);
            (actual < min).then(|| {
                ValidationError::new(format!("must be at least {min} characters long"))
                    .with_code(codes::MIN_LENGTH)
                    .with_param("min", min.to_string())
                    .with_param("actual", actual.to_string())
            })
        }))
    }

    /// Allows at most `max` characters.
    pub fn max_length(self, max: usize) -> Self {
        self.with_rule(on_content(move |value| {
            let actual = char_count(value);
            (actual > max).then(|| {
                ValidationError::new(format!("must be at most {max} characters long"))
                    .with_code(codes::MAX_LENGTH)
                    .with_param("max", max.to_string())
                    .with_param("actual", actual.to_string())
            })
        }))
    }

    /// Requires exactly `length` characters.
    pub fn exact_length(self, length: usize) -> Self {
        self.with_rule(on_content(move |value| {
            let actual = char_count(value);
            (actual != length).then(|| {
                ValidationError::new(format!("must be exactly {length} characters long"))
                    .with_code(codes::EXACT_LENGTH)
                    .with_param("length", length.to_string())
                    .with_param("actual", actual.to_string())
            })
        }))
    }

    /// Requires between `min` and `max` characters, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn length_between(self, min: usize, max: usize) -> Self {
        assert!(min <= max, "{}", BuildError::invalid_range(min, max));
        self.with_rule(on_content(move |value| {
            let actual = char_count(value);
            (actual < min || actual > max).then(|| {
                ValidationError::new(format!("must be between {min} and {max} characters long"))
                    .with_code(codes::LENGTH_RANGE)
                    .with_param("min", min.to_string())
                    .with_param("max", max.to_string())
                    .with_param("actual", actual.to_string())
            })
        }))
    }

    /// Requires a match of `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Use
    /// [`try_matches`](Self::try_matches) for patterns that are not literals.
    pub fn matches(self, pattern: &str) -> Self {
        match self.try_matches(pattern) {
            Ok(validator) => validator,
            Err(error) => panic!("{error}"),
        }
    }

    /// Requires a match of `pattern`, reporting an invalid pattern as an error.
    pub fn try_matches(self, pattern: &str) -> Result<Self, BuildError> {
        let regex = Regex::new(pattern).map_err(|source| BuildError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(self.matches_regex(regex))
    }

    /// Requires a match of a compiled regular expression.
    pub fn matches_regex(self, regex: Regex) -> Self {
        self.with_rule(on_content(move |value| {
            (!regex.is_match(value)).then(|| {
                ValidationError::new(format!("must match the pattern `{}`", regex.as_str()))
                    .with_code(codes::PATTERN)
                    .with_param("pattern", regex.as_str().to_owned())
            })
        }))
    }

    /// Requires `needle` to occur in the value.
    pub fn contains(self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.with_rule(on_content(move |value| {
            (!value.contains(needle.as_str())).then(|| {
                ValidationError::new(format!("must contain `{needle}`"))
                    .with_code(codes::CONTAINS)
                    .with_param("substring", needle.clone())
            })
        }))
    }

    /// Requires the value to start with `prefix`.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.with_rule(on_content(move |value| {
            (!value.starts_with(prefix.as_str())).then(|| {
                ValidationError::new(format!("must start with `{prefix}`"))
                    .with_code(codes::STARTS_WITH)
                    .with_param("prefix", prefix.clone())
            })
        }))
    }

    /// Requires the value to end with `suffix`.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.with_rule(on_content(move |value| {
            (!value.ends_with(suffix.as_str())).then(|| {
                ValidationError::new(format!("must end with `{suffix}`"))
                    .with_code(codes::ENDS_WITH)
                    .with_param("suffix", suffix.clone())
            })
        }))
    }

    /// Requires an email address of the form `local@domain.tld`.
    pub fn email(self) -> Self {
        self.with_rule(on_content(|value| {
            (!EMAIL_REGEX.is_match(value)).then(|| {
                ValidationError::new("must be a valid email address").with_code(codes::EMAIL)
            })
        }))
    }

    /// Requires an absolute `http` or `https` URL with a host.
    pub fn url(self) -> Self {
        self.with_rule(on_content(|value| {
            let valid = url::Url::parse(value)
                .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
            (!valid).then(|| ValidationError::new("must be a valid URL").with_code(codes::URL))
        }))
    }

    /// Requires a GUID in any of the common textual forms.
    pub fn guid(self) -> Self {
        self.with_rule(on_content(|value| {
            uuid::Uuid::parse_str(value)
                .is_err()
                .then(|| ValidationError::new("must be a valid GUID").with_code(codes::GUID))
        }))
    }

    /// Requires the value to equal one of `allowed`.
    ///
    /// # Panics
    ///
    /// Panics if `allowed` is empty.
    pub fn one_of<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.membership(allowed, false)
    }

    /// Like [`one_of`](Self::one_of), comparing case-insensitively.
    ///
    /// # Panics
    ///
    /// Panics if `allowed` is empty.
    pub fn one_of_ignore_case<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.membership(allowed, true)
    }

    fn membership<I, S>(self, allowed: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        assert!(
            !allowed.is_empty(),
            "{}",
            BuildError::EmptyChoices { rule: "one_of" }
        );
        let listed = allowed.join(", ");
        self.with_rule(on_content(move |value| {
            let found = allowed.iter().any(|candidate| {
                if ignore_case {
                    candidate.to_lowercase() == value.to_lowercase()
                } else {
                    candidate == value
                }
            });
            (!found).then(|| {
                ValidationError::new(format!("must be one of: {listed}"))
                    .with_code(codes::ONE_OF)
                    .with_param("allowed", listed.clone())
            })
        }))
    }

    /// Requires only ASCII letters and digits.
    pub fn alphanumeric(self) -> Self {
        self.with_rule(on_content(|value| {
            (!value.chars().all(|c| c.is_ascii_alphanumeric())).then(|| {
                ValidationError::new("must contain only letters and digits")
                    .with_code(codes::ALPHANUMERIC)
            })
        }))
    }

    /// Rejects uppercase letters.
    pub fn lowercase(self) -> Self {
        self.with_rule(on_content(|value| {
            value.chars().any(char::is_uppercase).then(|| {
                ValidationError::new("must be lowercase").with_code(codes::LOWERCASE)
            })
        }))
    }

    /// Rejects lowercase letters.
    pub fn uppercase(self) -> Self {
        self.with_rule(on_content(|value| {
            value.chars().any(char::is_lowercase).then(|| {
                ValidationError::new("must be uppercase").with_code(codes::UPPERCASE)
            })
        }))
    }
}

impl RuleBuilder for StringValidator {
    type Target = str;

    fn rules_mut(&mut self) -> &mut RuleSet<str> {
        &mut self.rules
    }
}

impl Validate for StringValidator {
    type Input = str;

    fn check(&self, input: Option<&str>) -> ValidationResult {
        self.rules.run(input)
    }
}

/// Creates an empty [`StringValidator`].
pub fn string() -> StringValidator {
    StringValidator::new()
}

// ============================================================================
// TESTS
// ============================================================================
