//! Rules and ordered rule storage
//!
//! Every built-in validator is a [`RuleSet`] plus some kind-specific state.
//! A [`Rule`] receives `None` for a null or absent value and decides for
//! itself whether that is a failure; most rules treat it as success and
//! leave nullability to `not_null`.
//!
//! [`RuleBuilder`] supplies the chaining grammar shared by all rule-based
//! validators: `rule`, `must`, `must_with_code`, `must_try`, plus `message`
//! and `code` overrides for the most recently added rule.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::config::{CascadeMode, ValidationOptions};
use super::error::{ValidationError, codes};
use super::guard::guard_result;
use super::result::ValidationResult;

type RuleFn<T> = dyn Fn(Option<&T>, &ValidationOptions) -> ValidationResult + Send + Sync;

// ============================================================================
// RULE
// ============================================================================

/// A single check over an optional value.
pub struct Rule<T: ?Sized> {
    check: Arc<RuleFn<T>>,
}

impl<T: ?Sized> Rule<T> {
    /// Wraps a check that does not depend on the validator's options.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(Option<&T>) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move |input: Option<&T>, _: &ValidationOptions| check(input)),
        }
    }

    /// Wraps a check that reads the validator's options at run time.
    pub fn with_options<F>(check: F) -> Self
    where
        F: Fn(Option<&T>, &ValidationOptions) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// A rule that fails with `error` when `predicate` returns `false`.
    ///
    /// A null value passes.
    pub fn predicate<P>(predicate: P, error: ValidationError) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |input| match input {
            Some(value) if !predicate(value) => error.clone().into(),
            _ => ValidationResult::success(),
        })
    }

    /// A rule that fails only for a null value.
    pub fn not_null() -> Self {
        Self::new(|input| match input {
            Some(_) => ValidationResult::success(),
            None => ValidationError::required().into(),
        })
    }

    /// Runs the check.
    pub fn apply(&self, input: Option<&T>, options: &ValidationOptions) -> ValidationResult {
        (self.check)(input, options)
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}

// ============================================================================
// RULE SET
// ============================================================================

struct RuleEntry<T: ?Sized> {
    rule: Rule<T>,
    message: Option<Cow<'static, str>>,
    code: Option<Cow<'static, str>>,
}

impl<T: ?Sized> RuleEntry<T> {
    fn apply(&self, input: Option<&T>, options: &ValidationOptions) -> ValidationResult {
        let result = guard_result("rule", || self.rule.apply(input, options));
        apply_overrides(result, self.message.as_ref(), self.code.as_ref())
    }
}

/// Replaces the message and code of every error in `result`.
///
/// `custom_fault` errors keep their own message and code.
pub(crate) fn apply_overrides(
    result: ValidationResult,
    message: Option<&Cow<'static, str>>,
    code: Option<&Cow<'static, str>>,
) -> ValidationResult {
    if result.is_valid() || (message.is_none() && code.is_none()) {
        return result;
    }
    result
        .into_iter()
        .map(|mut error| {
            if error.code() == Some(codes::CUSTOM_FAULT) {
                return error;
            }
            if let Some(message) = message {
                error = error.with_message(message.clone());
            }
            if let Some(code) = code {
                error = error.with_code(code.clone());
            }
            error
        })
        .collect()
}

impl<T: ?Sized> Clone for RuleEntry<T> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            message: self.message.clone(),
            code: self.code.clone(),
        }
    }
}

/// Rules in registration order, with the options that govern how they run.
pub struct RuleSet<T: ?Sized> {
    entries: Vec<RuleEntry<T>>,
    options: ValidationOptions,
}

impl<T: ?Sized> RuleSet<T> {
    /// An empty rule set with default options.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            options: ValidationOptions::default(),
        }
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule<T>) {
        self.entries.push(RuleEntry {
            rule,
            message: None,
            code: None,
        });
    }

    /// Overrides the message of every error the last rule produces.
    ///
    /// Does nothing when the set is empty.
    pub fn override_message(&mut self, message: Cow<'static, str>) {
        if let Some(entry) = self.entries.last_mut() {
            entry.message = Some(message);
        }
    }

    /// Overrides the code of every error the last rule produces.
    pub fn override_code(&mut self, code: Cow<'static, str>) {
        if let Some(entry) = self.entries.last_mut() {
            entry.code = Some(code);
        }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no rule was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The options in effect.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Replaces the options.
    pub fn set_options(&mut self, options: ValidationOptions) {
        self.options = options;
    }

    /// Sets the rule cascade mode.
    pub fn set_cascade(&mut self, cascade: CascadeMode) {
        self.options.cascade = cascade;
    }

    /// Runs every rule in order and combines the outcomes.
    ///
    /// With [`CascadeMode::Stop`] evaluation ends after the first failing
    /// rule.
    pub fn run(&self, input: Option<&T>) -> ValidationResult {
        let mut result = ValidationResult::success();
        let mut evaluated = 0usize;
        for entry in &self.entries {
            evaluated += 1;
            result.merge(entry.apply(input, &self.options));
            if self.options.cascade.stops_on_failure() && !result.is_valid() {
                break;
            }
        }
        tracing::trace!(
            rules = self.entries.len(),
            evaluated,
            errors = result.error_count(),
            "rule set evaluated"
        );
        result
    }
}

impl<T: ?Sized> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            options: self.options,
        }
    }
}

impl<T: ?Sized> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.entries.len())
            .field("options", &self.options)
            .finish()
    }
}

// ============================================================================
// RULE BUILDER
// ============================================================================

/// Chaining grammar shared by every rule-based validator.
///
/// Implementors only expose their rule storage; the builder methods are
/// provided.
pub trait RuleBuilder: Sized {
    /// The value type the rules inspect.
    type Target: ?Sized;

    /// Mutable access to the rule storage.
    fn rules_mut(&mut self) -> &mut RuleSet<Self::Target>;

    /// Adds a rule that sees the raw optional value.
    fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(Option<&Self::Target>) -> ValidationResult + Send + Sync + 'static,
    {
        self.rules_mut().push(Rule::new(check));
        self
    }

    /// Adds a predicate rule. A null value is not passed to the predicate.
    fn must<P>(self, predicate: P, message: impl Into<Cow<'static, str>>) -> Self
    where
        P: Fn(&Self::Target) -> bool + Send + Sync + 'static,
    {
        self.must_with_code(predicate, message, codes::PREDICATE)
    }

    /// Adds a predicate rule with an explicit error code.
    fn must_with_code<P>(
        mut self,
        predicate: P,
        message: impl Into<Cow<'static, str>>,
        code: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        P: Fn(&Self::Target) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(message).with_code(code);
        self.rules_mut().push(Rule::predicate(predicate, error));
        self
    }

    /// Adds a fallible predicate rule.
    ///
    /// An `Err` from the predicate is reported as a `custom_fault` failure
    /// carrying the error's text.
    fn must_try<P, E>(mut self, predicate: P, message: impl Into<Cow<'static, str>>) -> Self
    where
        P: Fn(&Self::Target) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let error = ValidationError::new(message).with_code(codes::PREDICATE);
        self.rules_mut().push(Rule::new(move |input| match input {
            None => ValidationResult::success(),
            Some(value) => match predicate(value) {
                Ok(true) => ValidationResult::success(),
                Ok(false) => error.clone().into(),
                Err(fault) => {
                    tracing::warn!(fault = %fault, "fallible predicate returned an error");
                    ValidationError::custom_fault(fault).into()
                }
            },
        }));
        self
    }

    /// Routes a message override to the most recently added rule.
    ///
    /// Validators that register checks outside [`rules_mut`](Self::rules_mut)
    /// override this to target whatever they registered last.
    fn override_last_message(&mut self, message: Cow<'static, str>) {
        self.rules_mut().override_message(message);
    }

    /// Routes a code override to the most recently added rule.
    fn override_last_code(&mut self, code: Cow<'static, str>) {
        self.rules_mut().override_code(code);
    }

    /// Overrides the message of the most recently added rule.
    ///
    /// `custom_fault` errors from a faulting rule keep their message.
    fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.override_last_message(message.into());
        self
    }

    /// Overrides the error code of the most recently added rule.
    fn code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.override_last_code(code.into());
        self
    }

    /// Sets the cascade mode for this validator's rules.
    fn cascade(mut self, cascade: CascadeMode) -> Self {
        self.rules_mut().set_cascade(cascade);
        self
    }

    /// Applies a full set of options.
    fn with_options(mut self, options: &ValidationOptions) -> Self {
        self.rules_mut().set_options(*options);
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Chain {
        rules: RuleSet<i32>,
    }

    impl RuleBuilder for Chain {
        type Target = i32;

        fn rules_mut(&mut self) -> &mut RuleSet<i32> {
            &mut self.rules
        }
    }

    fn messages(result: &ValidationResult) -> Vec<&str> {
        result.errors().iter().map(ValidationError::message).collect()
    }

    #[test]
    fn runs_rules_in_order() {
        let chain = Chain::default()
            .must(|v| *v > 10, "too small")
            .must(|v| v % 2 == 0, "odd");
        assert_eq!(messages(&chain.rules.run(Some(&3))), ["too small", "odd"]);
        assert!(chain.rules.run(Some(&12)).is_valid());
    }

    #[test]
    fn must_skips_null() {
        let chain = Chain::default().must(|_| false, "never");
        assert!(chain.rules.run(None).is_valid());
    }

    #[test]
    fn stop_cascade_ends_at_first_failure() {
        let chain = Chain::default()
            .must(|v| *v > 10, "too small")
            .must(|v| v % 2 == 0, "odd")
            .cascade(CascadeMode::Stop);
        assert_eq!(messages(&chain.rules.run(Some(&3))), ["too small"]);
    }

    #[test]
    fn message_and_code_override_last_rule_only() {
        let chain = Chain::default()
            .must(|v| *v > 10, "too small")
            .must(|v| v % 2 == 0, "odd")
            .message("must be even")
            .code("even");
        let result = chain.rules.run(Some(&3));
        assert_eq!(messages(&result), ["too small", "must be even"]);
        assert_eq!(result.errors()[0].code(), Some(codes::PREDICATE));
        assert_eq!(result.errors()[1].code(), Some("even"));
    }

    #[test]
    fn panicking_rule_becomes_custom_fault() {
        let chain = Chain::default()
            .must(|_| panic!("broken predicate"), "unused")
            .must(|v| *v > 0, "positive");
        let result = chain.rules.run(Some(&-1));
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.errors()[0].code(), Some(codes::CUSTOM_FAULT));
        assert_eq!(
            result.errors()[0].message(),
            "custom validation failed: broken predicate"
        );
    }

    #[test]
    fn overrides_leave_faults_intact() {
        let chain = Chain::default()
            .must(|_| panic!("db down"), "bad")
            .message("friendly")
            .code("friendly_code");
        let result = chain.rules.run(Some(&1));
        assert_eq!(result.errors()[0].code(), Some(codes::CUSTOM_FAULT));
        assert_eq!(result.errors()[0].message(), "custom validation failed: db down");

        let fallible = Chain::default()
            .must_try(|_| Err::<bool, _>("timeout"), "bad")
            .message("friendly");
        assert_eq!(
            messages(&fallible.rules.run(Some(&1))),
            ["custom validation failed: timeout"]
        );
    }

    #[test]
    fn must_try_reports_faults() {
        let chain = Chain::default().must_try(
            |v| if *v < 0 { Err("negative input") } else { Ok(*v > 5) },
            "too small",
        );
        assert_eq!(messages(&chain.rules.run(Some(&1))), ["too small"]);
        let fault = chain.rules.run(Some(&-1));
        assert_eq!(fault.errors()[0].code(), Some(codes::CUSTOM_FAULT));
        assert_eq!(
            fault.errors()[0].message(),
            "custom validation failed: negative input"
        );
    }

    #[test]
    fn rule_sees_null() {
        let chain = Chain::default().rule(|input| match input {
            None => ValidationResult::failure("missing"),
            Some(_) => ValidationResult::success(),
        });
        assert_eq!(messages(&chain.rules.run(None)), ["missing"]);
    }

    #[test]
    fn options_rule_reads_options() {
        let mut rules = RuleSet::<i32>::new();
        rules.push(Rule::with_options(|_, options| {
            if options.element_cascade.stops_on_failure() {
                ValidationResult::failure("stop")
            } else {
                ValidationResult::success()
            }
        }));
        assert!(rules.run(Some(&1)).is_valid());
        rules.set_options(ValidationOptions::fail_fast());
        assert!(!rules.run(Some(&1)).is_valid());
    }

    #[test]
    fn clone_is_independent() {
        let base = Chain::default().must(|v| *v > 0, "positive");
        let mut copy = Chain {
            rules: base.rules.clone(),
        };
        copy.rules.push(Rule::not_null());
        assert_eq!(base.rules.len(), 1);
        assert_eq!(copy.rules.len(), 2);
    }
}
