//! Date-time validator
//!
//! Rules relative to "now" (`in_past`, `in_future`, `within`) read a clock
//! that is fixed when the validator is created. The default clock is
//! [`Utc::now`]; tests inject a fixed one with
//! [`DateTimeValidator::with_clock`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeDelta, Utc, Weekday};

use crate::foundation::{
    BuildError, Rule, RuleBuilder, RuleSet, Validate, ValidationError, ValidationResult, codes,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Validates `DateTime<Utc>` values.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tessera_validator::prelude::*;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let validator = DateTimeValidator::with_clock(move || now).in_past().weekday();
///
/// let friday = Utc.with_ymd_and_hms(2024, 5, 31, 9, 0, 0).unwrap();
/// assert!(validator.validate(&friday).is_valid());
///
/// let sunday = Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap();
/// assert_eq!(validator.validate(&sunday).error_count(), 2);
/// ```
#[derive(Clone)]
pub struct DateTimeValidator {
    rules: RuleSet<DateTime<Utc>>,
    clock: Clock,
}

impl DateTimeValidator {
    /// A validator using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// A validator whose notion of "now" comes from `clock`.
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            rules: RuleSet::new(),
            clock: Arc::new(clock),
        }
    }

    fn compare<P>(mut self, predicate: P, error: ValidationError) -> Self
    where
        P: Fn(&DateTime<Utc>) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(move |input: Option<&DateTime<Utc>>| match input {
            Some(value) if !predicate(value) => error
                .clone()
                .with_param("actual", value.to_rfc3339())
                .into(),
            _ => ValidationResult::success(),
        }));
        self
    }

    /// Fails for a null value.
    pub fn not_null(mut self) -> Self {
        self.rules.push(Rule::not_null());
        self
    }

    /// Requires a moment strictly before `limit`.
    pub fn before(self, limit: DateTime<Utc>) -> Self {
        self.compare(
            move |value| *value < limit,
            ValidationError::new(format!("must be before {}", limit.to_rfc3339()))
                .with_code(codes::BEFORE)
                .with_param("limit", limit.to_rfc3339()),
        )
    }

    /// Requires a moment strictly after `limit`.
    pub fn after(self, limit: DateTime<Utc>) -> Self {
        self.compare(
            move |value| *value > limit,
            ValidationError::new(format!("must be after {}", limit.to_rfc3339()))
                .with_code(codes::AFTER)
                .with_param("limit", limit.to_rfc3339()),
        )
    }

    /// Requires a moment at or before `limit`.
    pub fn on_or_before(self, limit: DateTime<Utc>) -> Self {
        self.compare(
            move |value| *value <= limit,
            ValidationError::new(format!("must be on or before {}", limit.to_rfc3339()))
                .with_code(codes::ON_OR_BEFORE)
                .with_param("limit", limit.to_rfc3339()),
        )
    }

    /// Requires a moment at or after `limit`.
    pub fn on_or_after(self, limit: DateTime<Utc>) -> Self {
        self.compare(
            move |value| *value >= limit,
            ValidationError::new(format!("must be on or after {}", limit.to_rfc3339()))
                .with_code(codes::ON_OR_AFTER)
                .with_param("limit", limit.to_rfc3339()),
        )
    }

    /// Requires `start <= value <= end`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn between(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(
            start <= end,
            "{}",
            BuildError::invalid_range(start.to_rfc3339(), end.to_rfc3339())
        );
        self.compare(
            move |value| start <= *value && *value <= end,
            ValidationError::new(format!(
                "must be between {} and {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            ))
            .with_code(codes::RANGE)
            .with_param("min", start.to_rfc3339())
            .with_param("max", end.to_rfc3339()),
        )
    }

    /// Requires a moment before now.
    pub fn in_past(self) -> Self {
        let clock = Arc::clone(&self.clock);
        self.compare(
            move |value| *value < clock(),
            ValidationError::new("must be in the past").with_code(codes::IN_PAST),
        )
    }

    /// Requires a moment after now.
    pub fn in_future(self) -> Self {
        let clock = Arc::clone(&self.clock);
        self.compare(
            move |value| *value > clock(),
            ValidationError::new("must be in the future").with_code(codes::IN_FUTURE),
        )
    }

    /// Requires Monday through Friday.
    pub fn weekday(self) -> Self {
        self.compare(
            |value| !is_weekend(value.weekday()),
            ValidationError::new("must fall on a weekday").with_code(codes::WEEKDAY),
        )
    }

    /// Requires Saturday or Sunday.
    pub fn weekend(self) -> Self {
        self.compare(
            |value| is_weekend(value.weekday()),
            ValidationError::new("must fall on a weekend").with_code(codes::WEEKEND),
        )
    }

    /// Requires a moment no further than `window` from now, in either
    /// direction.
    pub fn within(self, window: TimeDelta) -> Self {
        let clock = Arc::clone(&self.clock);
        let window = window.abs();
        self.compare(
            move |value| (*value - clock()).abs() <= window,
            ValidationError::new(format!(
                "must be within {} seconds of now",
                window.num_seconds()
            ))
            .with_code(codes::WITHIN)
            .with_param("seconds", window.num_seconds().to_string()),
        )
    }
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

impl Default for DateTimeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DateTimeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeValidator")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl RuleBuilder for DateTimeValidator {
    type Target = DateTime<Utc>;

    fn rules_mut(&mut self) -> &mut RuleSet<DateTime<Utc>> {
        &mut self.rules
    }
}

impl Validate for DateTimeValidator {
    type Input = DateTime<Utc>;

    fn check(&self, input: Option<&DateTime<Utc>>) -> ValidationResult {
        self.rules.run(input)
    }
}

/// Creates an empty [`DateTimeValidator`] on the system clock.
pub fn datetime() -> DateTimeValidator {
    DateTimeValidator::new()
}
