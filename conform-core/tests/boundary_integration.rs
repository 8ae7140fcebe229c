//! Integration tests for boundary validation through the checker.

use chrono::{Duration, Utc};
use conform_core::prelude::*;
use regex::Regex;

#[test]
fn test_numeric_finiteness_defaults() {
    let checker = TypeChecker::new();

    let report = checker.validate_boundaries(
        &Value::Float(f64::INFINITY),
        &BoundarySpec::Numeric(NumericBounds::new()),
    );
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("finite"));

    let report = checker.validate_boundaries(
        &Value::Float(f64::NAN),
        &BoundarySpec::Numeric(NumericBounds::new().allow_non_finite()),
    );
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn test_numeric_full_options() {
    let checker = TypeChecker::new();
    let bounds = NumericBounds::new()
        .with_min(0.0)
        .with_max(100.0)
        .with_decimal_precision(2);

    assert!(checker
        .validate_boundaries(&Value::Float(99.25), &BoundarySpec::Numeric(bounds.clone()))
        .valid);

    let report = checker.validate_boundaries(
        &Value::Float(100.125),
        &BoundarySpec::Numeric(bounds),
    );
    assert!(!report.valid);
    // Above maximum AND too precise: both failures reported
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn test_numeric_type_gate() {
    let checker = TypeChecker::new();
    let report = checker.validate_boundaries(
        &Value::from("100"),
        &BoundarySpec::Numeric(NumericBounds::new().with_min(0.0)),
    );
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Expected a numeric value, got str"]);
}

#[test]
fn test_string_bounds() {
    let checker = TypeChecker::new();
    let bounds = StringBounds::new()
        .with_min_length(8)
        .require_pattern(Regex::new(r"[0-9]").unwrap())
        .forbid_pattern(Regex::new(r"\s").unwrap());

    assert!(checker
        .validate_boundaries(
            &Value::from("secret42"),
            &BoundarySpec::String(bounds.clone())
        )
        .valid);

    let report =
        checker.validate_boundaries(&Value::from("bad pw"), &BoundarySpec::String(bounds));
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 3);
}

#[test]
fn test_collection_string_identity_dedup() {
    let checker = TypeChecker::new();
    // 1 and "1" stringify identically, so this is flagged as a duplicate
    let report = checker.validate_boundaries(
        &Value::List(vec![Value::Int(1), Value::from("1")]),
        &BoundarySpec::Collection(CollectionBounds::new().no_duplicates()),
    );
    assert!(!report.valid);
    assert!(report.errors[0].contains("duplicate"));
}

#[test]
fn test_collection_sizes_and_empty_items() {
    let checker = TypeChecker::new();
    let bounds = CollectionBounds::new()
        .with_min_size(2)
        .with_max_size(4)
        .no_empty_items();

    let report = checker.validate_boundaries(
        &Value::List(vec![Value::from("a"), Value::Int(0), Value::from("")]),
        &BoundarySpec::Collection(bounds),
    );
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Empty items at indices: 1, 2"]);

    // Strings are sized values too
    let report = checker.validate_boundaries(
        &Value::from("abcdef"),
        &BoundarySpec::Collection(CollectionBounds::new().with_max_size(4)),
    );
    assert!(!report.valid);
}

#[test]
fn test_datetime_bounds() {
    let checker = TypeChecker::new();
    let now = Utc::now().naive_utc();

    let report = checker.validate_boundaries(
        &Value::DateTime(now - Duration::days(1)),
        &BoundarySpec::DateTime(DateTimeBounds::new().future_only()),
    );
    assert!(!report.valid);

    let report = checker.validate_boundaries(
        &Value::DateTime(now + Duration::days(30)),
        &BoundarySpec::DateTime(DateTimeBounds::new().future_only()),
    );
    assert!(report.valid);

    let report = checker.validate_boundaries(
        &Value::DateTime(now),
        &BoundarySpec::DateTime(DateTimeBounds::new().require_timezone()),
    );
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Value must carry timezone information"]);
}

#[test]
fn test_custom_validator_with_params() {
    let mut checker = TypeChecker::new();
    checker.register_validator("divisible_by", |value, params| {
        let divisor = params.get("divisor").and_then(|d| d.as_i64()).unwrap_or(1);
        match value {
            Value::Int(i) if i % divisor == 0 => Vec::new(),
            other => vec![format!("Value {other} is not divisible by {divisor}")],
        }
    });

    let mut params = serde_json::Map::new();
    params.insert("divisor".to_string(), serde_json::json!(3));
    let spec = BoundarySpec::Custom {
        name: "divisible_by".to_string(),
        params,
    };

    assert!(checker.validate_boundaries(&Value::Int(9), &spec).valid);
    let report = checker.validate_boundaries(&Value::Int(10), &spec);
    assert_eq!(report.errors, vec!["Value 10 is not divisible by 3"]);
}

#[test]
fn test_unknown_validator_is_reported() {
    let checker = TypeChecker::new();
    let report = checker.validate_boundaries(&Value::Int(1), &BoundarySpec::custom("nope"));
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Unknown boundary validator 'nope'"]);
}
