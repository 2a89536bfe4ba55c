//! Collection validator
//!
//! [`CollectionValidator`] works over any container `C` whose shared
//! reference iterates `&T`: slices, `Vec`, `VecDeque`, sets and so on.
//!
//! Count rules treat a null container as a failure. Element rules
//! (`for_each`, `all`, `does_not_contain`) pass it.

use std::borrow::{Borrow, Cow};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::foundation::{
    BuildError, CascadeMode, Rule, RuleBuilder, RuleSet, Validate, ValidationError,
    ValidationResult, codes,
};

// ============================================================================
// COLLECTION VALIDATOR
// ============================================================================

/// Validates a container of `T` elements.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let tags = list_of::<String>()
///     .not_empty()
///     .max_count(5)
///     .for_each(string().not_empty());
///
/// let value = vec!["hello".to_owned(), String::new(), "world".to_owned()];
/// let result = tags.validate(&value);
/// assert_eq!(result.error_count(), 1);
/// assert_eq!(result.errors()[0].property_path(), Some("[1]"));
/// ```
pub struct CollectionValidator<T, C: ?Sized = [T]> {
    rules: RuleSet<C>,
    _element: PhantomData<fn(&T)>,
}

fn count<T, C>(items: &C) -> usize
where
    C: ?Sized,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    items.into_iter().count()
}

impl<T, C> CollectionValidator<T, C>
where
    T: 'static,
    C: ?Sized + 'static,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    /// A validator without rules.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(),
            _element: PhantomData,
        }
    }

    fn with_rule(mut self, rule: Rule<C>) -> Self {
        self.rules.push(rule);
        self
    }

    fn count_rule<P>(self, accept: P, error: ValidationError) -> Self
    where
        P: Fn(usize) -> bool + Send + Sync + 'static,
    {
        self.with_rule(Rule::new(move |input: Option<&C>| match input {
            None => error.clone().with_param("actual", "null").into(),
            Some(items) => {
                let actual = count(items);
                if accept(actual) {
                    ValidationResult::success()
                } else {
                    error.clone().with_param("actual", actual.to_string()).into()
                }
            }
        }))
    }

    /// Fails for a null container.
    pub fn not_null(self) -> Self {
        self.with_rule(Rule::not_null())
    }

    /// Fails for a null or empty container.
    pub fn not_empty(self) -> Self {
        self.with_rule(Rule::new(|input: Option<&C>| match input {
            Some(items) if items.into_iter().next().is_some() => ValidationResult::success(),
            _ => ValidationError::new("collection cannot be null or empty")
                .with_code(codes::NOT_EMPTY)
                .into(),
        }))
    }

    /// Requires at least `min` elements.
    pub fn min_count(self, min: usize) -> Self {
        self.count_rule(
            move |actual| actual >= min,
            ValidationError::new(format!("must contain at least {min} items"))
                .with_code(codes::MIN_COUNT)
                .with_param("min", min.to_string()),
        )
    }

    /// Allows at most `max` elements.
    pub fn max_count(self, max: usize) -> Self {
        self.count_rule(
            move |actual| actual <= max,
            ValidationError::new(format!("must contain at most {max} items"))
                .with_code(codes::MAX_COUNT)
                .with_param("max", max.to_string()),
        )
    }

    /// Requires exactly `expected` elements.
    pub fn exact_count(self, expected: usize) -> Self {
        self.count_rule(
            move |actual| actual == expected,
            ValidationError::new(format!("must contain exactly {expected} items"))
                .with_code(codes::EXACT_COUNT)
                .with_param("count", expected.to_string()),
        )
    }

    /// Requires between `min` and `max` elements, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn count_between(self, min: usize, max: usize) -> Self {
        assert!(min <= max, "{}", BuildError::invalid_range(min, max));
        self.count_rule(
            move |actual| (min..=max).contains(&actual),
            ValidationError::new(format!("must contain between {min} and {max} items"))
                .with_code(codes::COUNT_RANGE)
                .with_param("min", min.to_string())
                .with_param("max", max.to_string()),
        )
    }

    /// Requires `element` to be present, compared with `eq`.
    ///
    /// A null container fails.
    pub fn contains_by<F>(self, element: T, eq: F) -> Self
    where
        T: fmt::Debug + Send + Sync,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(format!("must contain {element:?}"))
            .with_code(codes::CONTAINS)
            .with_param("element", format!("{element:?}"));
        self.with_rule(Rule::new(move |input: Option<&C>| {
            let found = input.is_some_and(|items| items.into_iter().any(|item| eq(item, &element)));
            if found {
                ValidationResult::success()
            } else {
                error.clone().into()
            }
        }))
    }

    /// Requires `element` to be present.
    pub fn contains(self, element: T) -> Self
    where
        T: PartialEq + fmt::Debug + Send + Sync,
    {
        self.contains_by(element, |a, b| a == b)
    }

    /// Rejects `element`, compared with `eq`. A null container passes.
    pub fn does_not_contain_by<F>(self, element: T, eq: F) -> Self
    where
        T: fmt::Debug + Send + Sync,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(format!("must not contain {element:?}"))
            .with_code(codes::NOT_CONTAINS)
            .with_param("element", format!("{element:?}"));
        self.with_rule(Rule::new(move |input: Option<&C>| {
            let found = input.is_some_and(|items| items.into_iter().any(|item| eq(item, &element)));
            if found {
                error.clone().into()
            } else {
                ValidationResult::success()
            }
        }))
    }

    /// Rejects `element`.
    pub fn does_not_contain(self, element: T) -> Self
    where
        T: PartialEq + fmt::Debug + Send + Sync,
    {
        self.does_not_contain_by(element, |a, b| a == b)
    }

    /// Rejects duplicates.
    pub fn unique(self) -> Self
    where
        T: Eq + Hash,
    {
        self.with_rule(Rule::new(|input: Option<&C>| {
            let Some(items) = input else {
                return ValidationResult::success();
            };
            let mut seen = HashSet::new();
            match items.into_iter().position(|item| !seen.insert(item)) {
                Some(index) => duplicate_error(index).into(),
                None => ValidationResult::success(),
            }
        }))
    }

    /// Rejects elements that `eq` considers equal to an earlier one.
    pub fn unique_by<F>(self, eq: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.with_rule(Rule::new(move |input: Option<&C>| {
            let Some(items) = input else {
                return ValidationResult::success();
            };
            let mut seen: Vec<&T> = Vec::new();
            for (index, item) in items.into_iter().enumerate() {
                if seen.iter().any(|earlier| eq(earlier, item)) {
                    return duplicate_error(index).into();
                }
                seen.push(item);
            }
            ValidationResult::success()
        }))
    }

    /// Validates every element with `validator`.
    ///
    /// Nested error paths are rewritten to `[index]` or `[index].path`.
    /// Every element is visited unless the validator's `element_cascade`
    /// option is [`CascadeMode::Stop`].
    pub fn for_each<V>(self, validator: V) -> Self
    where
        V: Validate + Send + Sync + 'static,
        T: Borrow<V::Input>,
    {
        self.with_rule(Rule::with_options(move |input: Option<&C>, options| {
            input.map_or_else(ValidationResult::success, |items| {
                validate_elements(items, &validator, options.element_cascade)
            })
        }))
    }

    /// Like [`for_each`](Self::for_each), stopping at the first invalid
    /// element regardless of options.
    pub fn for_each_fail_fast<V>(self, validator: V) -> Self
    where
        V: Validate + Send + Sync + 'static,
        T: Borrow<V::Input>,
    {
        self.with_rule(Rule::new(move |input: Option<&C>| {
            input.map_or_else(ValidationResult::success, |items| {
                validate_elements(items, &validator, CascadeMode::Stop)
            })
        }))
    }

    /// Requires `predicate` to hold for every element.
    pub fn all<P>(self, predicate: P, message: impl Into<Cow<'static, str>>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(message).with_code(codes::ALL);
        self.with_rule(Rule::new(move |input: Option<&C>| {
            let Some(items) = input else {
                return ValidationResult::success();
            };
            match items.into_iter().position(|item| !predicate(item)) {
                Some(index) => error
                    .clone()
                    .with_param("index", index.to_string())
                    .into(),
                None => ValidationResult::success(),
            }
        }))
    }

    /// Requires `predicate` to hold for at least one element.
    ///
    /// A null or empty container fails.
    pub fn any<P>(self, predicate: P, message: impl Into<Cow<'static, str>>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(message).with_code(codes::ANY);
        self.with_rule(Rule::new(move |input: Option<&C>| {
            if input.is_some_and(|items| items.into_iter().any(&predicate)) {
                ValidationResult::success()
            } else {
                error.clone().into()
            }
        }))
    }
}

fn duplicate_error(index: usize) -> ValidationError {
    ValidationError::new("must not contain duplicate items")
        .with_code(codes::UNIQUE)
        .with_param("index", index.to_string())
}

fn validate_elements<T, C, V>(items: &C, validator: &V, cascade: CascadeMode) -> ValidationResult
where
    C: ?Sized,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
    V: Validate,
    T: Borrow<V::Input>,
{
    let mut result = ValidationResult::success();
    for (index, item) in items.into_iter().enumerate() {
        let element = validator.validate(item.borrow());
        if element.is_valid() {
            continue;
        }
        result = result.and(element.with_path_prefix(&format!("[{index}]")));
        if cascade.stops_on_failure() {
            break;
        }
    }
    result
}

impl<T, C> Default for CollectionValidator<T, C>
where
    T: 'static,
    C: ?Sized + 'static,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: ?Sized> Clone for CollectionValidator<T, C> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            _element: PhantomData,
        }
    }
}

impl<T, C: ?Sized> fmt::Debug for CollectionValidator<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionValidator")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<T, C: ?Sized> RuleBuilder for CollectionValidator<T, C> {
    type Target = C;

    fn rules_mut(&mut self) -> &mut RuleSet<C> {
        &mut self.rules
    }
}

impl<T, C: ?Sized> Validate for CollectionValidator<T, C> {
    type Input = C;

    fn check(&self, input: Option<&C>) -> ValidationResult {
        self.rules.run(input)
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// Creates a validator for slices `[T]`.
pub fn array_of<T: 'static>() -> CollectionValidator<T, [T]> {
    CollectionValidator::new()
}

/// Creates a validator for `Vec<T>`.
pub fn list_of<T: 'static>() -> CollectionValidator<T, Vec<T>> {
    CollectionValidator::new()
}

/// Creates a validator for any container `C` of `T`.
pub fn collection_of<T, C>() -> CollectionValidator<T, C>
where
    T: 'static,
    C: ?Sized + 'static,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    CollectionValidator::new()
}

/// Creates a validator for any iterable container `C` of `T`.
///
/// Same as [`collection_of`]; provided for call sites that only care about
/// iteration.
pub fn enumerable_of<T, C>() -> CollectionValidator<T, C>
where
    T: 'static,
    C: ?Sized + 'static,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    CollectionValidator::new()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use super::*;
    use crate::foundation::ValidationOptions;
    use crate::validators::{number, string};

    fn paths(result: &ValidationResult) -> Vec<Option<&str>> {
        result
            .errors()
            .iter()
            .map(ValidationError::property_path)
            .collect()
    }

    #[test]
    fn count_rules() {
        let validator = array_of::<i32>().min_count(2).max_count(3);
        assert!(validator.validate(&[1, 2]).is_valid());
        assert!(!validator.validate(&[1]).is_valid());
        assert!(!validator.validate(&[1, 2, 3, 4]).is_valid());
        assert!(array_of::<i32>().exact_count(2).validate(&[1, 2]).is_valid());
        assert!(array_of::<i32>().count_between(1, 2).validate(&[1]).is_valid());
    }

    #[test]
    fn count_rules_fail_on_null() {
        let result = array_of::<i32>()
            .min_count(1)
            .max_count(5)
            .validate_nullable(None);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.errors()[0].param("actual"), Some("null"));
    }

    #[test]
    fn not_empty() {
        let validator = list_of::<i32>().not_empty();
        assert!(validator.validate(&vec![1]).is_valid());
        assert!(!validator.validate(&Vec::new()).is_valid());
        assert!(!validator.validate_nullable(None).is_valid());
    }

    #[test]
    fn for_each_reports_indexed_paths() {
        let validator = array_of::<&str>().for_each(string().not_empty().min_length(3));
        let result = validator.validate(&["hello", "", "ab"]);
        assert_eq!(paths(&result), [Some("[1]"), Some("[2]")]);
    }

    #[test]
    fn for_each_keeps_nested_paths() {
        let inner = list_of::<i32>().for_each(number::<i32>().positive());
        let nested = array_of::<Vec<i32>>().for_each(inner);
        let result = nested.validate(&[vec![1], vec![1, -1]]);
        assert_eq!(paths(&result), [Some("[1].[1]")]);
    }

    #[test]
    fn for_each_fail_fast_stops() {
        let validator = array_of::<i32>().for_each_fail_fast(number::<i32>().positive());
        let result = validator.validate(&[-1, -2, -3]);
        assert_eq!(paths(&result), [Some("[0]")]);
    }

    #[test]
    fn element_cascade_option_stops_for_each() {
        let validator = array_of::<i32>()
            .for_each(number::<i32>().positive())
            .with_options(&ValidationOptions::new().with_element_cascade(CascadeMode::Stop));
        assert_eq!(validator.validate(&[-1, -2]).error_count(), 1);
    }

    #[test]
    fn contains_and_does_not_contain() {
        let validator = array_of::<i32>().contains(3).does_not_contain(7);
        assert!(validator.validate(&[1, 3]).is_valid());
        assert_eq!(
            validator.validate(&[1, 7]).errors()[0].code(),
            Some(codes::CONTAINS)
        );
        assert_eq!(validator.validate(&[3, 7]).errors()[0].code(), Some(codes::NOT_CONTAINS));

        let null = validator.validate_nullable(None);
        assert_eq!(null.error_count(), 1);
        assert_eq!(null.errors()[0].code(), Some(codes::CONTAINS));
    }

    #[test]
    fn contains_by_custom_equality() {
        let validator = list_of::<String>()
            .contains_by("ADMIN".to_owned(), |a, b| a.eq_ignore_ascii_case(b));
        assert!(validator.validate(&vec!["admin".to_owned()]).is_valid());
    }

    #[test]
    fn unique() {
        let validator = array_of::<i32>().unique();
        assert!(validator.validate(&[1, 2, 3]).is_valid());
        let result = validator.validate(&[1, 2, 1]);
        assert_eq!(result.errors()[0].param("index"), Some("2"));

        let by_len = array_of::<&str>().unique_by(|a, b| a.len() == b.len());
        assert!(!by_len.validate(&["ab", "cd"]).is_valid());
    }

    #[test]
    fn all_and_any() {
        let validator = array_of::<i32>()
            .all(|n| *n >= 0, "must not contain negatives")
            .any(|n| *n > 10, "must contain a large number");
        assert!(validator.validate(&[1, 20]).is_valid());
        let result = validator.validate(&[-1, 2]);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.errors()[0].param("index"), Some("0"));

        let empty = validator.validate(&[]);
        assert_eq!(empty.error_message(), Some("must contain a large number"));
    }

    #[test]
    fn works_over_other_containers() {
        let deque = collection_of::<i32, VecDeque<i32>>().min_count(2);
        assert!(deque.validate(&VecDeque::from([1, 2])).is_valid());

        let set = enumerable_of::<u8, BTreeSet<u8>>().for_each(number::<u8>().less_than(10));
        let result = set.validate(&BTreeSet::from([1, 50]));
        assert_eq!(paths(&result), [Some("[1]")]);
    }
}
