//! End-to-end validation scenarios.
//!
//! Each test builds a validator the way a consumer would, through the
//! prelude, and checks the full error report.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tessera_validator::prelude::*;

#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: i32,
    email: Option<String>,
    is_active: bool,
    tags: Vec<String>,
}

impl Person {
    fn new(name: &str, age: i32) -> Self {
        Self {
            name: name.to_owned(),
            age,
            email: None,
            is_active: true,
            tags: Vec::new(),
        }
    }
}

fn paths(result: &ValidationResult) -> Vec<Option<&str>> {
    result.errors().iter().map(ValidationError::property_path).collect()
}

fn messages(result: &ValidationResult) -> Vec<&str> {
    result.errors().iter().map(ValidationError::message).collect()
}

// ============================================================================
// SCALARS
// ============================================================================

#[test]
fn empty_string_reports_not_empty_only() {
    let validator = string().not_empty().min_length(5);
    let result = validator.validate("");
    assert_eq!(messages(&result), ["value cannot be null or empty"]);
}

#[test]
fn number_rules_fail_independently() {
    let validator = int().positive().less_than(10).not_equal(5);
    let result = validator.validate(&5);
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].code(), Some(codes::NOT_EQUAL));
}

#[rstest]
#[case("someone@example.com", true)]
#[case("first.last+tag@sub.example.org", true)]
#[case("no-at-sign.example.com", false)]
#[case("missing@tld", false)]
#[case("", true)]
fn email_format(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(string().email().validate(input).is_valid(), valid);
}

#[rstest]
#[case(0.5, true)]
#[case(1.0, true)]
#[case(1.5, false)]
#[case(f64::NAN, false)]
fn double_range_and_finiteness(#[case] input: f64, #[case] valid: bool) {
    let validator = double().finite().between(0.0, 1.0);
    assert_eq!(validator.validate(&input).is_valid(), valid);
}

// ============================================================================
// COLLECTIONS
// ============================================================================

#[test]
fn for_each_visits_every_element() {
    let validator = list_of::<String>().for_each(string().not_empty());
    let items = vec!["hello".to_owned(), String::new(), "world".to_owned()];
    let result = validator.validate(&items);
    assert_eq!(paths(&result), [Some("[1]")]);
}

#[test]
fn element_cascade_comes_from_options() {
    let options = ValidationOptions::new().with_element_cascade(CascadeMode::Stop);
    let validator = array_of::<i32>()
        .for_each(int().positive())
        .with_options(&options);
    let result = validator.validate(&[1, -1, -2][..]);
    assert_eq!(paths(&result), [Some("[1]")]);
}

// ============================================================================
// OBJECTS
// ============================================================================

fn person_validator() -> ObjectValidator<Person> {
    object::<Person>()
        .rule_for("Name", |p| p.name.as_str(), string().not_empty())
        .rule_for("Age", |p| &p.age, int().positive())
}

#[test]
fn object_reports_each_property_path() {
    let result = person_validator().validate(&Person::new("", -5));
    assert_eq!(paths(&result), [Some("Name"), Some("Age")]);
    assert_eq!(result.errors()[0].property_name(), Some("Name"));
}

#[test]
fn nested_collection_path_is_composed() {
    let validator = person_validator().rule_for(
        "Tags",
        |p| p.tags.as_slice(),
        array_of::<String>().for_each(string().min_length(3)),
    );
    let mut person = Person::new("Ada", 36);
    person.tags = vec!["math".to_owned(), "cs".to_owned()];

    let result = validator.validate(&person);
    assert_eq!(paths(&result), [Some("Tags.[1]")]);
}

#[test]
fn inactive_person_skips_conditional_rules() {
    let validator = object::<Person>().when(
        |p| p.is_active,
        |rules| rules.rule_for_option("Email", |p| p.email.as_deref(), string().email()),
    );
    let mut person = Person::new("Ada", 36);
    person.is_active = false;
    person.email = Some("bad".to_owned());
    assert!(validator.validate(&person).is_valid());

    person.is_active = true;
    let result = validator.validate(&person);
    assert_eq!(paths(&result), [Some("Email")]);
}

#[test]
fn absent_optional_property_is_null() {
    let validator = object::<Person>().rule_for_option(
        "Email",
        |p| p.email.as_deref(),
        string().not_null().email(),
    );
    let result = validator.validate(&Person::new("Ada", 36));
    assert_eq!(result.errors()[0].code(), Some(codes::NOT_NULL));
    assert_eq!(paths(&result), [Some("Email")]);
}

#[test]
fn null_object_only_fails_not_null() {
    assert!(person_validator().validate_nullable(None).is_valid());
    assert_eq!(
        person_validator().not_null().validate_nullable(None).error_count(),
        1
    );
}

// ============================================================================
// UNIONS
// ============================================================================

#[test]
fn union_names_both_types_on_mismatch() {
    let validator = union(string().not_empty()).or(int().positive());
    let result = validator.validate(&3.5_f64);
    let message = result.error_message().unwrap_or_default();
    assert!(!result.is_valid());
    assert!(message.contains("str"), "{message}");
    assert!(message.contains("i32"), "{message}");
}

#[test]
fn union_accepts_either_candidate() {
    let validator = union(string().not_empty()).or(int().positive());
    assert!(validator.validate(&String::from("x")).is_valid());
    assert!(validator.validate(&9_i32).is_valid());
    assert!(!validator.validate(&0_i32).is_valid());
}

// ============================================================================
// REPORTS
// ============================================================================

#[test]
fn exception_summarises_all_errors() {
    let error = person_validator()
        .validate(&Person::new("", -5))
        .into_result()
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Validation failed with 2 errors: value cannot be null or empty; must be positive"
    );
}

#[test]
fn validate_and_throw_returns_input() {
    let person = Person::new("Ada", 36);
    let checked = person_validator().validate_and_throw(&person);
    assert_eq!(checked.map(|p| p.name.as_str()).ok(), Some("Ada"));
}

#[test]
fn report_serializes_to_json() {
    let result = person_validator().validate(&Person::new("Ada", -1));
    let json = result.to_json_value();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["property_path"], "Age");
    assert_eq!(json["errors"][0]["code"], codes::POSITIVE);
}

#[test]
fn options_load_from_json() {
    let options = ValidationOptions::from_json_str(r#"{ "cascade": "stop" }"#).unwrap();
    let validator = int().positive().less_than(-10).with_options(&options);
    assert_eq!(validator.validate(&0).error_count(), 1);
    assert_eq!(options.element_cascade, CascadeMode::Continue);
}

#[test]
fn validators_are_shareable_across_threads() {
    let validator = std::sync::Arc::new(person_validator());
    let handles: Vec<_> = (0..4)
        .map(|age| {
            let validator = std::sync::Arc::clone(&validator);
            std::thread::spawn(move || validator.validate(&Person::new("T", age)).is_valid())
        })
        .collect();
    let outcomes: Vec<bool> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or(false))
        .collect();
    assert_eq!(outcomes, [false, true, true, true]);
}
