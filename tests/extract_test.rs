//! Integration tests for error extraction.
//!
//! The checker below stands in for any validation collaborator: it walks a
//! product record, accumulates every failure with stillwater's Validation,
//! and hands the result to the extractor.

use flatline::{
    extract_errors, extract_failure, extract_optional, ErrorMap, FieldKey, FieldPath, Issue,
    Issues, ValidationResult,
};
use serde_json::{json, Value};
use stillwater::Validation;

fn check_product(value: &Value) -> ValidationResult<Value> {
    let mut found: Vec<Issue> = Vec::new();

    match value.get("name") {
        None => found.push(Issue::new(FieldPath::from_field("name"), "Required")),
        Some(v) if !v.is_string() => found.push(
            Issue::new(FieldPath::from_field("name"), "Must be a string")
                .with_code("invalid_type"),
        ),
        Some(_) => {}
    }

    match value.get("price").and_then(Value::as_f64) {
        None => found.push(Issue::new(
            FieldPath::from_field("price"),
            "Please enter a number",
        )),
        Some(p) if p <= 0.0 => found.push(
            Issue::new(FieldPath::from_field("price"), "Price must be greater than 0")
                .with_code("min_value")
                .with_got(p.to_string()),
        ),
        Some(_) => {}
    }

    if let Some(categories) = value.get("categories").and_then(Value::as_array) {
        for (idx, category) in categories.iter().enumerate() {
            if !category.is_string() {
                found.push(Issue::new(
                    FieldPath::from_field("categories").push_index(idx),
                    "Category must be a string",
                ));
            }
        }
    }

    match Issues::from_vec(found) {
        Some(issues) => Validation::Failure(issues),
        None => Validation::Success(value.clone()),
    }
}

#[test]
fn test_valid_record_has_no_errors() {
    let result = check_product(&json!({
        "name": "Laptop",
        "price": 10,
        "categories": ["Laptop"]
    }));

    assert!(result.is_success());
    assert!(extract_failure(&result).is_empty());
}

#[test]
fn test_failing_record_flattens_to_field_messages() {
    let result = check_product(&json!({
        "name": 42,
        "price": -1,
        "categories": ["ok", 7]
    }));

    let errors = extract_failure(&result);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.field("name"), Some("Must be a string"));
    assert_eq!(errors.field("price"), Some("Price must be greater than 0"));
    // The nested categories[1] failure surfaces under its top-level field.
    assert_eq!(errors.field("categories"), Some("Category must be a string"));
}

#[test]
fn test_single_price_issue() {
    let issues = vec![Issue::new(
        FieldPath::from_field("price"),
        "Price must be greater than 0",
    )];

    let errors = extract_errors(&issues);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.field("price"), Some("Price must be greater than 0"));
}

#[test]
fn test_repeated_field_keeps_last_message() {
    let issues = vec![
        Issue::new(FieldPath::from_field("name"), "Required"),
        Issue::new(FieldPath::from_field("name"), "Must be a string"),
    ];

    let errors = extract_errors(&issues);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.field("name"), Some("Must be a string"));
}

#[test]
fn test_independent_fields_both_present() {
    let issues = vec![
        Issue::new(FieldPath::from_field("email"), "Invalid email"),
        Issue::new(FieldPath::from_field("phone"), "Invalid phone"),
    ];

    let errors = extract_errors(&issues);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.field("email"), Some("Invalid email"));
    assert_eq!(errors.field("phone"), Some("Invalid phone"));
}

#[test]
fn test_map_size_never_exceeds_distinct_first_keys() {
    let issues = vec![
        Issue::new(FieldPath::from_field("a"), "1"),
        Issue::new(FieldPath::from_field("a").push_field("deep"), "2"),
        Issue::new(FieldPath::from_field("b"), "3"),
        Issue::new(FieldPath::root(), "4"),
        Issue::new(FieldPath::root(), "5"),
    ];

    // Distinct first keys: a, b, root.
    let errors = extract_errors(&issues);
    assert!(errors.len() <= 3);
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_extraction_carries_no_state_between_calls() {
    let issues = vec![
        Issue::new(FieldPath::from_field("email"), "Invalid email"),
        Issue::new(FieldPath::from_field("phone"), "Invalid phone"),
    ];

    let first = extract_errors(&issues);
    let second = extract_errors(&issues);
    assert_eq!(first, second);
}

#[test]
fn test_absent_issues_tolerated() {
    assert_eq!(extract_optional(None::<&Issues>), ErrorMap::new());
    assert_eq!(extract_optional(None::<Vec<Issue>>), ErrorMap::new());

    let issues = Issues::single(Issue::new(FieldPath::from_field("name"), "Required"));
    let errors = extract_optional(Some(&issues));
    assert_eq!(errors.field("name"), Some("Required"));
}

#[test]
fn test_root_failures_keep_their_own_key() {
    let result: ValidationResult<Value> = Validation::Failure(Issues::single(
        Issue::new(FieldPath::root(), "expected an object"),
    ));

    let errors = extract_failure(&result);
    assert_eq!(errors.root(), Some("expected an object"));
    assert_eq!(errors.get(&FieldKey::Root), Some("expected an object"));
    assert_eq!(errors.to_json(), json!({"(root)": "expected an object"}));
}

#[test]
fn test_error_body_rendering() {
    let issues = vec![
        Issue::new(FieldPath::from_field("email"), "Invalid email"),
        Issue::new(FieldPath::from_field("phone"), "Invalid phone"),
    ];

    assert_eq!(
        extract_errors(&issues).to_json(),
        json!({
            "email": "Invalid email",
            "phone": "Invalid phone"
        })
    );
}
