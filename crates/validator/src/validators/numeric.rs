//! Numeric validator
//!
//! One implementation covers every numeric width through the [`Number`]
//! trait. Comparison rules pass a null value; use `not_null` to require one.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;

use crate::foundation::{
    BuildError, Rule, RuleBuilder, RuleSet, Validate, ValidationError, ValidationResult, codes,
};

// ============================================================================
// NUMBER TRAIT
// ============================================================================

/// A numeric type the [`NumberValidator`] can check.
pub trait Number: PartialOrd + Copy + fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// The additive identity, used by `positive`, `negative` and `zero`.
    const ZERO: Self;

    /// `false` for NaN and infinities. Always `true` for exact types.
    fn is_finite(self) -> bool {
        true
    }

    /// Whether `self` is an integer multiple of a non-zero `divisor`.
    fn is_multiple_of(self, divisor: Self) -> bool;
}

macro_rules! impl_integer {
    ($($ty:ty),+) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0;

                fn is_multiple_of(self, divisor: Self) -> bool {
                    self.checked_rem(divisor).is_none_or(|rem| rem == 0)
                }
            }
        )+
    };
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_float {
    ($($ty:ident),+) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0.0;

                fn is_finite(self) -> bool {
                    $ty::is_finite(self)
                }

                fn is_multiple_of(self, divisor: Self) -> bool {
                    let quotient = self / divisor;
                    (quotient - quotient.round()).abs() <= $ty::EPSILON * quotient.abs().max(1.0)
                }
            }
        )+
    };
}

impl_float!(f32, f64);

impl Number for Decimal {
    const ZERO: Self = Decimal::ZERO;

    fn is_multiple_of(self, divisor: Self) -> bool {
        self.checked_rem(divisor).is_none_or(|rem| rem.is_zero())
    }
}

// ============================================================================
// NUMBER VALIDATOR
// ============================================================================

/// Validates numeric values of type `N`.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let validator = int().positive().less_than(10).not_equal(5);
///
/// assert!(validator.validate(&3).is_valid());
/// let result = validator.validate(&5);
/// assert_eq!(result.error_count(), 1);
/// assert_eq!(result.error_message(), Some("must not be equal to 5"));
/// ```
#[derive(Debug, Clone)]
pub struct NumberValidator<N: Number> {
    rules: RuleSet<N>,
}

impl<N: Number> Default for NumberValidator<N> {
    fn default() -> Self {
        Self {
            rules: RuleSet::new(),
        }
    }
}

impl<N: Number> NumberValidator<N> {
    /// A validator without rules.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rule(mut self, rule: Rule<N>) -> Self {
        self.rules.push(rule);
        self
    }

    fn compare<P, E>(self, predicate: P, error: E) -> Self
    where
        P: Fn(N) -> bool + Send + Sync + 'static,
        E: Fn(N) -> ValidationError + Send + Sync + 'static,
    {
        self.with_rule(Rule::new(move |input: Option<&N>| match input {
            Some(&value) if !predicate(value) => error(value)
                .with_param("actual", value.to_string())
                .into(),
            _ => ValidationResult::success(),
        }))
    }

    /// Fails for a null value.
    pub fn not_null(self) -> Self {
        self.with_rule(Rule::not_null())
    }

    /// Requires the value to equal `expected`.
    pub fn equal(self, expected: N) -> Self {
        self.compare(
            move |value| value == expected,
            move |_| {
                ValidationError::new(format!("must be equal to {expected}"))
                    .with_code(codes::EQUAL)
                    .with_param("expected", expected.to_string())
            },
        )
    }

    /// Requires the value to differ from `unexpected`.
    pub fn not_equal(self, unexpected: N) -> Self {
        self.compare(
            move |value| value != unexpected,
            move |_| {
                ValidationError::new(format!("must not be equal to {unexpected}"))
                    .with_code(codes::NOT_EQUAL)
                    .with_param("unexpected", unexpected.to_string())
            },
        )
    }

    /// Requires `value > bound`.
    pub fn greater_than(self, bound: N) -> Self {
        self.compare(
            move |value| value > bound,
            move |_| {
                ValidationError::new(format!("must be greater than {bound}"))
                    .with_code(codes::GREATER_THAN)
                    .with_param("min", bound.to_string())
            },
        )
    }

    /// Requires `value >= bound`.
    pub fn greater_than_or_equal(self, bound: N) -> Self {
        self.compare(
            move |value| value >= bound,
            move |_| {
                ValidationError::new(format!("must be greater than or equal to {bound}"))
                    .with_code(codes::GREATER_THAN_OR_EQUAL)
                    .with_param("min", bound.to_string())
            },
        )
    }

    /// Requires `value < bound`.
    pub fn less_than(self, bound: N) -> Self {
        self.compare(
            move |value| value < bound,
            move |_| {
                ValidationError::new(format!("must be less than {bound}"))
                    .with_code(codes::LESS_THAN)
                    .with_param("max", bound.to_string())
            },
        )
    }

    /// Requires `value <= bound`.
    pub fn less_than_or_equal(self, bound: N) -> Self {
        self.compare(
            move |value| value <= bound,
            move |_| {
                ValidationError::new(format!("must be less than or equal to {bound}"))
                    .with_code(codes::LESS_THAN_OR_EQUAL)
                    .with_param("max", bound.to_string())
            },
        )
    }

    /// Requires `min <= value <= max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or the bounds are not comparable (NaN).
    pub fn between(self, min: N, max: N) -> Self {
        assert!(
            matches!(min.partial_cmp(&max), Some(Ordering::Less | Ordering::Equal)),
            "{}",
            BuildError::invalid_range(min, max)
        );
        self.compare(
            move |value| min <= value && value <= max,
            move |_| {
                ValidationError::new(format!("must be between {min} and {max}"))
                    .with_code(codes::RANGE)
                    .with_param("min", min.to_string())
                    .with_param("max", max.to_string())
            },
        )
    }

    /// Requires `min < value < max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or the bounds are not comparable (NaN).
    pub fn exclusive_between(self, min: N, max: N) -> Self {
        assert!(
            matches!(min.partial_cmp(&max), Some(Ordering::Less | Ordering::Equal)),
            "{}",
            BuildError::invalid_range(min, max)
        );
        self.compare(
            move |value| min < value && value < max,
            move |_| {
                ValidationError::new(format!("must be between {min} and {max} (exclusive)"))
                    .with_code(codes::EXCLUSIVE_RANGE)
                    .with_param("min", min.to_string())
                    .with_param("max", max.to_string())
            },
        )
    }

    /// Requires `value > 0`.
    pub fn positive(self) -> Self {
        self.compare(
            |value| value > N::ZERO,
            |_| ValidationError::new("must be positive").with_code(codes::POSITIVE),
        )
    }

    /// Requires `value < 0`.
    pub fn negative(self) -> Self {
        self.compare(
            |value| value < N::ZERO,
            |_| ValidationError::new("must be negative").with_code(codes::NEGATIVE),
        )
    }

    /// Requires `value == 0`.
    pub fn zero(self) -> Self {
        self.compare(
            |value| value == N::ZERO,
            |_| ValidationError::new("must be zero").with_code(codes::ZERO),
        )
    }

    /// Requires `value != 0`.
    pub fn non_zero(self) -> Self {
        self.compare(
            |value| value != N::ZERO,
            |_| ValidationError::new("must not be zero").with_code(codes::NON_ZERO),
        )
    }

    /// Requires the value to equal one of `allowed`.
    ///
    /// # Panics
    ///
    /// Panics if `allowed` is empty.
    pub fn one_of(self, allowed: impl IntoIterator<Item = N>) -> Self {
        let allowed: Vec<N> = allowed.into_iter().collect();
        assert!(
            !allowed.is_empty(),
            "{}",
            BuildError::EmptyChoices { rule: "one_of" }
        );
        let listed = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.compare(
            move |value| allowed.contains(&value),
            move |_| {
                ValidationError::new(format!("must be one of: {listed}"))
                    .with_code(codes::ONE_OF)
                    .with_param("allowed", listed.clone())
            },
        )
    }

    /// Requires the value to be a multiple of `divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn multiple_of(self, divisor: N) -> Self {
        assert!(divisor != N::ZERO, "multiple_of requires a non-zero divisor");
        self.compare(
            move |value| value.is_multiple_of(divisor),
            move |_| {
                ValidationError::new(format!("must be a multiple of {divisor}"))
                    .with_code(codes::MULTIPLE_OF)
                    .with_param("divisor", divisor.to_string())
            },
        )
    }

    /// Rejects NaN and infinities.
    pub fn finite(self) -> Self {
        self.compare(Number::is_finite, |_| {
            ValidationError::new("must be a finite number").with_code(codes::FINITE)
        })
    }
}

impl<N: Number> RuleBuilder for NumberValidator<N> {
    type Target = N;

    fn rules_mut(&mut self) -> &mut RuleSet<N> {
        &mut self.rules
    }
}

impl<N: Number> Validate for NumberValidator<N> {
    type Input = N;

    fn check(&self, input: Option<&N>) -> ValidationResult {
        self.rules.run(input)
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// Creates a validator for any [`Number`] type.
pub fn number<N: Number>() -> NumberValidator<N> {
    NumberValidator::new()
}

/// Creates a validator for `u8` values.
pub fn byte() -> NumberValidator<u8> {
    number()
}

/// Creates a validator for `i16` values.
pub fn short() -> NumberValidator<i16> {
    number()
}

/// Creates a validator for `i32` values.
pub fn int() -> NumberValidator<i32> {
    number()
}

/// Creates a validator for `i64` values.
pub fn long() -> NumberValidator<i64> {
    number()
}

/// Creates a validator for `f32` values.
pub fn float() -> NumberValidator<f32> {
    number()
}

/// Creates a validator for `f64` values.
pub fn double() -> NumberValidator<f64> {
    number()
}

/// Creates a validator for [`Decimal`] values.
pub fn decimal() -> NumberValidator<Decimal> {
    number()
}

// ============================================================================
// TESTS
// ============================================================================
