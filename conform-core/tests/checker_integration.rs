//! Integration tests exercising the checker end to end.

use conform_core::prelude::*;
use proptest::prelude::*;

#[test]
fn test_passing_values_round_trip_unchanged() {
    let checker = TypeChecker::new();
    let cases = vec![
        (Value::Int(7), TypeDescriptor::INT),
        (Value::from("hello"), TypeDescriptor::STR),
        (Value::Bool(true), TypeDescriptor::BOOL),
        (Value::Float(2.5), TypeDescriptor::FLOAT),
        (
            Value::List(vec![Value::Int(1), Value::Int(2)]),
            TypeDescriptor::list_of(TypeDescriptor::INT),
        ),
    ];
    for (value, descriptor) in cases {
        let result = checker.check_type(&value, &descriptor, &[]).unwrap();
        assert!(result.valid, "{descriptor} rejected {value}");
        assert_eq!(result.value, value);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn test_list_of_ints_partial_coercion() {
    let checker = TypeChecker::new();
    let input = Value::List(vec![Value::from("1"), Value::from("2"), Value::from("x")]);
    let result = checker
        .check_type(&input, &TypeDescriptor::list_of(TypeDescriptor::INT), &[])
        .unwrap();

    assert!(!result.valid);
    let Value::List(items) = &result.value else {
        panic!("expected a list back, got {:?}", result.value);
    };
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Value::Int(1));
    assert_eq!(items[1], Value::Int(2));
    // The failing element is left uncoerced for inspection
    assert_eq!(items[2], Value::from("x"));
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("Index 2"));
}

#[test]
fn test_union_member_order_is_pinned() {
    let checker = TypeChecker::new();

    // 5 is already an int: the structural pass returns it untouched even
    // though the str member comes first and string coercion always works
    let result = checker
        .check_type(
            &Value::Int(5),
            &TypeDescriptor::union(vec![TypeDescriptor::STR, TypeDescriptor::INT]),
            &[],
        )
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.value, Value::Int(5));

    // With no structural match, coercion falls back to declaration order
    let result = checker
        .check_type(
            &Value::Int(5),
            &TypeDescriptor::union(vec![TypeDescriptor::list(), TypeDescriptor::STR]),
            &[],
        )
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.value, Value::List(vec![Value::Int(5)]));
}

#[test]
fn test_constraint_aggregation_reports_every_failure() {
    let checker = TypeChecker::new();
    let too_small = RangeConstraint::min(100.0);
    let wrong_choice = ChoiceConstraint::new(vec![Value::Int(1), Value::Int(2)]);
    let result = checker
        .check_type(
            &Value::Int(50),
            &TypeDescriptor::INT,
            &[&too_small, &wrong_choice],
        )
        .unwrap();
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_boolean_token_scenarios() {
    let checker = TypeChecker::new();

    let result = checker
        .check_type(&Value::from("yes"), &TypeDescriptor::BOOL, &[])
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.value, Value::Bool(true));

    let result = checker
        .check_type(&Value::from("off"), &TypeDescriptor::BOOL, &[])
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.value, Value::Bool(false));

    let result = checker
        .check_type(&Value::from("maybe"), &TypeDescriptor::BOOL, &[])
        .unwrap();
    assert!(!result.valid);
    assert_eq!(result.value, Value::from("maybe"));
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_convenience_scenarios() {
    let report = check_string_length(&Value::from("hello"), Some(3), Some(10));
    assert!(report.valid);
    assert!(report.errors.is_empty());

    let report = check_string_length(&Value::from("hi"), Some(3), None);
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Length 2 violates constraint: min 3"]);

    let colors = [
        Value::from("red"),
        Value::from("green"),
        Value::from("blue"),
    ];
    let report = check_choices(&Value::from("Red"), &colors);
    assert!(!report.valid);

    let checker = TypeChecker::new();
    let relaxed = ChoiceConstraint::new(colors.to_vec()).case_insensitive();
    let result = checker
        .check_type(&Value::from("Red"), &TypeDescriptor::STR, &[&relaxed])
        .unwrap();
    assert!(result.valid);
}

#[test]
fn test_nested_descriptor_round_trip() {
    let checker = TypeChecker::new();
    // dict[str, tuple[int, float]] with string inputs everywhere
    let descriptor = TypeDescriptor::map_of(
        TypeDescriptor::STR,
        TypeDescriptor::tuple_of(vec![TypeDescriptor::INT, TypeDescriptor::FLOAT]),
    );
    let input = Value::Map(vec![(
        Value::from("point"),
        Value::List(vec![Value::from("3"), Value::from("4.5")]),
    )]);
    let result = checker.check_type(&input, &descriptor, &[]).unwrap();
    assert!(result.valid, "errors: {:?}", result.errors);
    assert_eq!(
        result.value,
        Value::Map(vec![(
            Value::from("point"),
            Value::Tuple(vec![Value::Int(3), Value::Float(4.5)])
        )])
    );
}

#[test]
fn test_raise_on_error_propagates_from_composites() {
    let checker = TypeChecker::new()
        .with_auto_convert(false)
        .with_raise_on_error(true);
    let input = Value::List(vec![Value::Int(1), Value::from("x")]);
    let err = checker
        .check_type(&input, &TypeDescriptor::list_of(TypeDescriptor::INT), &[])
        .unwrap_err();
    assert!(matches!(err, ConformError::TypeMismatch { .. }));
}

proptest! {
    /// The result invariant holds for arbitrary string inputs checked
    /// against int: valid exactly when no errors were collected.
    #[test]
    fn prop_valid_iff_no_errors(input in ".{0,40}") {
        let checker = TypeChecker::new();
        let result = checker
            .check_type(&Value::from(input), &TypeDescriptor::INT, &[])
            .unwrap();
        prop_assert_eq!(result.valid, result.errors.is_empty());
    }

    /// Values that already conform are returned untouched.
    #[test]
    fn prop_conforming_ints_are_idempotent(n in any::<i64>()) {
        let checker = TypeChecker::new();
        let result = checker
            .check_type(&Value::Int(n), &TypeDescriptor::INT, &[])
            .unwrap();
        prop_assert!(result.valid);
        prop_assert_eq!(result.value, Value::Int(n));
    }
}
