//! Object validator
//!
//! Validates a struct through named property rules. Each property is a
//! `(name, accessor)` pair plus a nested validator; nested error paths are
//! rewritten to `name` or `name.path`.
//!
//! Evaluation order is fixed: `not_null`, then property rules in
//! declaration order, then object-level `must` rules, then conditional
//! blocks. A null object only ever fails `not_null`.
//!
//! `message` and `code` apply to whatever was registered last: the
//! `not_null` check, a property rule, an object-level rule or a
//! conditional block.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::foundation::guard::guarded;
use crate::foundation::{
    CascadeMode, Rule, RuleBuilder, RuleSet, Validate, ValidationError, ValidationOptions,
    ValidationResult, apply_overrides, codes,
};

type PropertyCheck<T> = Arc<dyn Fn(&T) -> ValidationResult + Send + Sync>;
type Condition<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Message and code overrides for one registered item.
#[derive(Debug, Clone, Default)]
struct Overrides {
    message: Option<Cow<'static, str>>,
    code: Option<Cow<'static, str>>,
}

impl Overrides {
    fn apply(&self, result: ValidationResult) -> ValidationResult {
        apply_overrides(result, self.message.as_ref(), self.code.as_ref())
    }
}

struct PropertyRule<T: 'static> {
    check: PropertyCheck<T>,
    overrides: Overrides,
}

impl<T: 'static> Clone for PropertyRule<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            overrides: self.overrides.clone(),
        }
    }
}

struct Conditional<T: 'static> {
    condition: Condition<T>,
    expected: bool,
    validator: ObjectValidator<T>,
    overrides: Overrides,
}

impl<T: 'static> Clone for Conditional<T> {
    fn clone(&self) -> Self {
        Self {
            condition: Arc::clone(&self.condition),
            expected: self.expected,
            validator: self.validator.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

/// The item `message` and `code` target.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LastAdded {
    Nothing,
    NotNull,
    Property(String),
    ObjectRule,
    Conditional,
}

// ============================================================================
// OBJECT VALIDATOR
// ============================================================================

/// Validates values of a struct type `T`.
///
/// Declaring a rule for a property name that already has one replaces the
/// earlier rule; the property keeps its original position.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// struct User {
///     name: String,
///     age: i32,
///     email: Option<String>,
/// }
///
/// let validator = object::<User>()
///     .rule_for("Name", |u| &u.name, string().not_empty())
///     .rule_for("Age", |u| &u.age, int().between(0, 150))
///     .rule_for_option("Email", |u| u.email.as_ref(), string().email());
///
/// let user = User { name: String::new(), age: 200, email: None };
/// let result = validator.validate(&user);
///
/// let paths: Vec<_> = result.errors().iter().map(|e| e.property_path()).collect();
/// assert_eq!(paths, [Some("Name"), Some("Age")]);
/// ```
pub struct ObjectValidator<T: 'static> {
    base: RuleSet<T>,
    properties: IndexMap<String, PropertyRule<T>>,
    rules: RuleSet<T>,
    conditionals: Vec<Conditional<T>>,
    last: LastAdded,
}

impl<T: 'static> ObjectValidator<T> {
    /// A validator without rules.
    pub fn new() -> Self {
        Self {
            base: RuleSet::new(),
            properties: IndexMap::new(),
            rules: RuleSet::new(),
            conditionals: Vec::new(),
            last: LastAdded::Nothing,
        }
    }

    /// Fails for a null object.
    pub fn not_null(mut self) -> Self {
        self.base.push(Rule::not_null());
        self.last = LastAdded::NotNull;
        self
    }

    fn insert_property(mut self, name: String, check: PropertyCheck<T>) -> Self {
        if self.properties.contains_key(&name) {
            tracing::debug!(property = %name, "replacing existing property rule");
        }
        let rule = PropertyRule {
            check,
            overrides: Overrides::default(),
        };
        self.properties.insert(name.clone(), rule);
        self.last = LastAdded::Property(name);
        self
    }

    /// The override slot of the most recently registered item.
    fn last_overrides(&mut self) -> Option<&mut Overrides> {
        match &self.last {
            LastAdded::Property(name) => self
                .properties
                .get_mut(name)
                .map(|property| &mut property.overrides),
            LastAdded::Conditional => self
                .conditionals
                .last_mut()
                .map(|conditional| &mut conditional.overrides),
            LastAdded::Nothing | LastAdded::NotNull | LastAdded::ObjectRule => None,
        }
    }

    /// Validates the property `name` obtained through `accessor`.
    pub fn rule_for<P, V, A>(self, name: impl Into<String>, accessor: A, validator: V) -> Self
    where
        P: Borrow<V::Input> + ?Sized,
        V: Validate + Send + Sync + 'static,
        A: Fn(&T) -> &P + Send + Sync + 'static,
    {
        let name = name.into();
        let path = name.clone();
        let check: PropertyCheck<T> = Arc::new(move |object: &T| {
            validator
                .validate(accessor(object).borrow())
                .for_property(&path)
        });
        self.insert_property(name, check)
    }

    /// Validates an optional property. An absent value reaches the nested
    /// validator as null.
    pub fn rule_for_option<P, V, A>(
        self,
        name: impl Into<String>,
        accessor: A,
        validator: V,
    ) -> Self
    where
        P: Borrow<V::Input> + ?Sized,
        V: Validate + Send + Sync + 'static,
        A: Fn(&T) -> Option<&P> + Send + Sync + 'static,
    {
        let name = name.into();
        let path = name.clone();
        let check: PropertyCheck<T> = Arc::new(move |object: &T| {
            let value = accessor(object).map(<P as Borrow<V::Input>>::borrow);
            validator.validate_nullable(value).for_property(&path)
        });
        self.insert_property(name, check)
    }

    /// Checks the property `name` with an inline predicate.
    pub fn rule_for_must<P, A, F>(
        self,
        name: impl Into<String>,
        accessor: A,
        predicate: F,
        message: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        P: ?Sized,
        A: Fn(&T) -> &P + Send + Sync + 'static,
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let error = ValidationError::new(message)
            .with_code(codes::PREDICATE)
            .with_property(name.clone());
        let check: PropertyCheck<T> = Arc::new(move |object: &T| {
            if predicate(accessor(object)) {
                ValidationResult::success()
            } else {
                error.clone().into()
            }
        });
        self.insert_property(name, check)
    }

    /// Applies the rules built by `build` only when `condition` holds.
    ///
    /// The condition is not evaluated for a null object, and the sub-rules
    /// are not evaluated at all when it does not hold.
    ///
    /// ```
    /// use tessera_validator::prelude::*;
    ///
    /// struct Account { active: bool, email: String }
    ///
    /// let validator = object::<Account>().when(
    ///     |a| a.active,
    ///     |rules| rules.rule_for("Email", |a| &a.email, string().not_empty().email()),
    /// );
    ///
    /// let inactive = Account { active: false, email: String::new() };
    /// assert!(validator.validate(&inactive).is_valid());
    /// ```
    pub fn when<C, B>(self, condition: C, build: B) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        B: FnOnce(ObjectValidator<T>) -> ObjectValidator<T>,
    {
        self.conditional(condition, true, build)
    }

    /// Applies the rules built by `build` only when `condition` does not hold.
    pub fn unless<C, B>(self, condition: C, build: B) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        B: FnOnce(ObjectValidator<T>) -> ObjectValidator<T>,
    {
        self.conditional(condition, false, build)
    }

    fn conditional<C, B>(mut self, condition: C, expected: bool, build: B) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        B: FnOnce(ObjectValidator<T>) -> ObjectValidator<T>,
    {
        let mut validator = build(ObjectValidator::new());
        validator.set_options(*self.rules.options());
        self.conditionals.push(Conditional {
            condition: Arc::new(condition),
            expected,
            validator,
            overrides: Overrides::default(),
        });
        self.last = LastAdded::Conditional;
        self
    }

    fn set_options(&mut self, options: ValidationOptions) {
        self.base.set_options(options);
        self.rules.set_options(options);
        for conditional in &mut self.conditionals {
            conditional.validator.set_options(options);
        }
    }

    /// Number of declared properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Declared property names in evaluation order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    fn stops(&self, result: &ValidationResult) -> bool {
        self.rules.options().cascade.stops_on_failure() && !result.is_valid()
    }
}

impl<T: 'static> RuleBuilder for ObjectValidator<T> {
    type Target = T;

    /// Object-level rules, evaluated after every property rule.
    fn rules_mut(&mut self) -> &mut RuleSet<T> {
        self.last = LastAdded::ObjectRule;
        &mut self.rules
    }

    fn override_last_message(&mut self, message: Cow<'static, str>) {
        match self.last {
            LastAdded::NotNull => self.base.override_message(message),
            LastAdded::ObjectRule => self.rules.override_message(message),
            _ => {
                if let Some(overrides) = self.last_overrides() {
                    overrides.message = Some(message);
                }
            }
        }
    }

    fn override_last_code(&mut self, code: Cow<'static, str>) {
        match self.last {
            LastAdded::NotNull => self.base.override_code(code),
            LastAdded::ObjectRule => self.rules.override_code(code),
            _ => {
                if let Some(overrides) = self.last_overrides() {
                    overrides.code = Some(code);
                }
            }
        }
    }

    fn cascade(mut self, cascade: CascadeMode) -> Self {
        let options = self.rules.options().with_cascade(cascade);
        self.set_options(options);
        self
    }

    fn with_options(mut self, options: &ValidationOptions) -> Self {
        self.set_options(*options);
        self
    }
}

impl<T: 'static> Validate for ObjectValidator<T> {
    type Input = T;

    fn check(&self, input: Option<&T>) -> ValidationResult {
        let mut result = self.base.run(input);
        let Some(object) = input else {
            return result;
        };
        if self.stops(&result) {
            return result;
        }

        for (name, property) in &self.properties {
            let outcome = match guarded(|| (property.check)(object)) {
                Ok(outcome) => outcome,
                Err(fault) => {
                    tracing::warn!(
                        property = %name,
                        fault = %fault,
                        "property check faulted during validation"
                    );
                    ValidationError::custom_fault(fault)
                        .with_property(name.clone())
                        .into()
                }
            };
            result.merge(property.overrides.apply(outcome));
            if self.stops(&result) {
                return result;
            }
        }

        result.merge(self.rules.run(Some(object)));
        if self.stops(&result) {
            return result;
        }

        for conditional in &self.conditionals {
            match guarded(|| (conditional.condition)(object)) {
                Ok(holds) if holds == conditional.expected => {
                    let outcome = conditional.validator.validate(object);
                    result.merge(conditional.overrides.apply(outcome));
                }
                Ok(_) => {}
                Err(fault) => {
                    tracing::warn!(fault = %fault, "condition faulted during validation");
                    result.push(ValidationError::custom_fault(fault));
                }
            }
            if self.stops(&result) {
                return result;
            }
        }

        tracing::trace!(
            properties = self.properties.len(),
            conditionals = self.conditionals.len(),
            errors = result.error_count(),
            "object validated"
        );
        result
    }
}

impl<T: 'static> Default for ObjectValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Clone for ObjectValidator<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            properties: self.properties.clone(),
            rules: self.rules.clone(),
            conditionals: self.conditionals.clone(),
            last: self.last.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for ObjectValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("rules", &self.rules)
            .field("conditionals", &self.conditionals.len())
            .finish()
    }
}

/// Creates an empty [`ObjectValidator`].
pub fn object<T: 'static>() -> ObjectValidator<T> {
    ObjectValidator::new()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validators::{array_of, int, list_of, string};

    #[derive(Debug, Clone)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(Debug, Clone)]
    struct Customer {
        name: String,
        age: i32,
        active: bool,
        email: Option<String>,
        address: Address,
        tags: Vec<String>,
    }

    fn customer() -> Customer {
        Customer {
            name: "Ada".to_owned(),
            age: 36,
            active: true,
            email: Some("ada@example.com".to_owned()),
            address: Address {
                street: "1 Main St".to_owned(),
                city: "London".to_owned(),
            },
            tags: vec!["vip".to_owned()],
        }
    }

    fn paths(result: &ValidationResult) -> Vec<Option<&str>> {
        result
            .errors()
            .iter()
            .map(ValidationError::property_path)
            .collect()
    }

    #[test]
    fn valid_object_passes() {
        let validator = object::<Customer>()
            .rule_for("Name", |c| &c.name, string().not_empty())
            .rule_for("Age", |c| &c.age, int().between(0, 150));
        assert!(validator.validate(&customer()).is_valid());
    }

    #[test]
    fn property_errors_carry_name_and_path() {
        let validator = object::<Customer>()
            .rule_for("Name", |c| &c.name, string().not_empty())
            .rule_for("Age", |c| &c.age, int().greater_than_or_equal(18));
        let mut value = customer();
        value.name.clear();
        value.age = 12;

        let result = validator.validate(&value);
        assert_eq!(paths(&result), [Some("Name"), Some("Age")]);
        assert_eq!(result.errors()[1].property_name(), Some("Age"));
    }

    #[test]
    fn nested_objects_compose_paths() {
        let address = object::<Address>()
            .rule_for("Street", |a| &a.street, string().not_empty())
            .rule_for("City", |a| &a.city, string().min_length(3));
        let validator = object::<Customer>().rule_for("Address", |c| &c.address, address);

        let mut value = customer();
        value.address.street.clear();
        value.address.city = "X".to_owned();

        let result = validator.validate(&value);
        assert_eq!(paths(&result), [Some("Address.Street"), Some("Address.City")]);
        assert_eq!(result.errors()[0].property_name(), Some("Street"));
    }

    #[test]
    fn collection_property_paths() {
        let validator = object::<Customer>().rule_for(
            "Tags",
            |c| &c.tags,
            list_of::<String>().for_each(string().min_length(3)),
        );
        let mut value = customer();
        value.tags = vec!["vip".to_owned(), "x".to_owned()];

        let result = validator.validate(&value);
        assert_eq!(paths(&result), [Some("Tags.[1]")]);
    }

    #[test]
    fn slice_accessors_work() {
        let validator = object::<Customer>().rule_for(
            "Tags",
            |c| c.tags.as_slice(),
            array_of::<String>().max_count(0),
        );
        assert_eq!(paths(&validator.validate(&customer())), [Some("Tags")]);
    }

    #[test]
    fn optional_property_sees_null() {
        let validator = object::<Customer>()
            .rule_for_option("Email", |c| c.email.as_ref(), string().not_null().email());
        let mut value = customer();
        assert!(validator.validate(&value).is_valid());

        value.email = None;
        let result = validator.validate(&value);
        assert_eq!(result.error_message(), Some("value cannot be null"));
        assert_eq!(paths(&result), [Some("Email")]);
    }

    #[test]
    fn rule_for_must() {
        let validator = object::<Customer>().rule_for_must(
            "Name",
            |c| c.name.as_str(),
            |name| name.starts_with(char::is_uppercase),
            "must be capitalized",
        );
        let mut value = customer();
        value.name = "ada".to_owned();
        let result = validator.validate(&value);
        assert_eq!(result.error_message(), Some("must be capitalized"));
        assert_eq!(paths(&result), [Some("Name")]);
    }

    #[test]
    fn redeclared_property_replaces_in_place() {
        let validator = object::<Customer>()
            .rule_for("Name", |c| &c.name, string().min_length(10))
            .rule_for("Age", |c| &c.age, int().negative())
            .rule_for("Name", |c| &c.name, string().max_length(1));

        assert_eq!(validator.property_names().collect::<Vec<_>>(), ["Name", "Age"]);
        let result = validator.validate(&customer());
        let messages: Vec<_> = result.errors().iter().map(ValidationError::message).collect();
        assert_eq!(
            messages,
            ["must be at most 1 characters long", "must be negative"]
        );
    }

    #[test]
    fn evaluation_order_is_fixed() {
        let validator = object::<Customer>()
            .when(|_| true, |rules| rules.must(|_| false, "conditional"))
            .must(|_| false, "object rule")
            .rule_for_must("Name", |c| &c.name, |_| false, "property");

        let result = validator.validate(&customer());
        let messages: Vec<_> = result.errors().iter().map(ValidationError::message).collect();
        assert_eq!(messages, ["property", "object rule", "conditional"]);
    }

    #[test]
    fn when_false_skips_block() {
        let validator = object::<Customer>().when(
            |c| c.active,
            |rules| rules.rule_for("Email", |c| &c.name, string().email()),
        );
        let mut value = customer();
        value.name = "not an email".to_owned();
        assert!(!validator.validate(&value).is_valid());

        value.active = false;
        assert!(validator.validate(&value).is_valid());
    }

    #[test]
    fn unless_inverts_condition() {
        let validator = object::<Customer>()
            .unless(|c| c.active, |rules| rules.must(|_| false, "inactive"));
        let mut value = customer();
        assert!(validator.validate(&value).is_valid());
        value.active = false;
        assert_eq!(validator.validate(&value).error_message(), Some("inactive"));
    }

    #[test]
    fn null_object_only_fails_not_null() {
        let lenient = object::<Customer>()
            .rule_for("Name", |c| &c.name, string().not_empty())
            .must(|_| false, "never");
        assert!(lenient.validate_nullable(None).is_valid());

        let strict = lenient.not_null();
        let result = strict.validate_nullable(None);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.error_message(), Some("value cannot be null"));
    }

    #[test]
    fn panicking_accessor_is_contained() {
        let validator = object::<Customer>()
            .rule_for("Tags", |c| &c.tags[5], string().not_empty())
            .rule_for("Name", |c| &c.name, string().max_length(1));
        let result = validator.validate(&customer());
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.errors()[0].code(), Some(codes::CUSTOM_FAULT));
        assert_eq!(result.errors()[0].property_path(), Some("Tags"));
        assert_eq!(result.errors()[0].property_name(), Some("Tags"));
        assert_eq!(paths(&result), [Some("Tags"), Some("Name")]);
    }

    #[test]
    fn panicking_must_predicate_keeps_property() {
        let validator = object::<Customer>()
            .rule_for_must("Tags", |c| &c.tags, |tags| tags[3].is_empty(), "unused")
            .message("tags are broken");
        let result = validator.validate(&customer());
        let error = &result.errors()[0];
        assert_eq!(error.code(), Some(codes::CUSTOM_FAULT));
        assert_eq!(error.property_path(), Some("Tags"));
        assert!(error.message().starts_with("custom validation failed"));
    }

    #[test]
    fn message_targets_last_property_rule() {
        let validator = object::<Customer>()
            .must(|_| false, "object rule")
            .rule_for("Name", |c| &c.name, string().max_length(1))
            .message("name too long")
            .code("name_length");
        let result = validator.validate(&customer());
        let report: Vec<_> = result
            .errors()
            .iter()
            .map(|e| (e.property_path(), e.message(), e.code()))
            .collect();
        assert_eq!(
            report,
            [
                (Some("Name"), "name too long", Some("name_length")),
                (None, "object rule", Some(codes::PREDICATE)),
            ]
        );
    }

    #[test]
    fn message_targets_optional_and_must_properties() {
        let validator = object::<Customer>()
            .rule_for_option("Email", |c| c.email.as_ref(), string().not_null())
            .message("email is required")
            .rule_for_must("Name", |c| &c.name, |_| false, "original")
            .message("name rejected");
        let mut value = customer();
        value.email = None;
        let result = validator.validate(&value);
        let messages: Vec<_> = result.errors().iter().map(ValidationError::message).collect();
        assert_eq!(messages, ["email is required", "name rejected"]);
        assert_eq!(paths(&result), [Some("Email"), Some("Name")]);
    }

    #[test]
    fn message_targets_not_null() {
        let validator = object::<Customer>()
            .must(|_| false, "object rule")
            .not_null()
            .message("customer is required");
        let result = validator.validate_nullable(None);
        assert_eq!(result.error_message(), Some("customer is required"));
        assert_eq!(
            validator.validate(&customer()).error_message(),
            Some("object rule")
        );
    }

    #[test]
    fn message_targets_conditional_block() {
        let validator = object::<Customer>()
            .when(
                |c| c.active,
                |rules| rules.rule_for("Age", |c| &c.age, int().negative()),
            )
            .message("active customers need a negative age");
        let result = validator.validate(&customer());
        assert_eq!(
            result.error_message(),
            Some("active customers need a negative age")
        );
        assert_eq!(paths(&result), [Some("Age")]);
    }

    #[test]
    fn redeclared_property_drops_old_overrides() {
        let validator = object::<Customer>()
            .rule_for("Name", |c| &c.name, string().max_length(1))
            .message("old message")
            .rule_for("Name", |c| &c.name, string().max_length(2));
        let result = validator.validate(&customer());
        assert_eq!(
            result.error_message(),
            Some("must be at most 2 characters long")
        );
    }

    #[test]
    fn panicking_condition_is_contained() {
        let validator = object::<Customer>().when(
            |c| c.tags[9].is_empty(),
            |rules| rules.must(|_| false, "unreachable"),
        );
        let result = validator.validate(&customer());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors()[0].code(), Some(codes::CUSTOM_FAULT));
    }

    #[test]
    fn stop_cascade_ends_after_first_failing_property() {
        let validator = object::<Customer>()
            .rule_for("Name", |c| &c.name, string().max_length(1))
            .rule_for("Age", |c| &c.age, int().negative())
            .cascade(CascadeMode::Stop);
        assert_eq!(paths(&validator.validate(&customer())), [Some("Name")]);
    }

    #[test]
    fn cloned_validator_is_independent() {
        let base = object::<Customer>().rule_for("Name", |c| &c.name, string().not_empty());
        let extended = base
            .clone()
            .rule_for("Age", |c| &c.age, int().negative());
        assert_eq!(base.property_count(), 1);
        assert_eq!(extended.property_count(), 2);
    }
}
