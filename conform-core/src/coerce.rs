//! Best-effort conversion of values to requested target types.
//!
//! Each converter is total over its documented input shapes and errors
//! (never silently returns wrong data) when a conversion is not
//! meaningful. The per-type policies here are behavioral contracts:
//! string token tables for ints and bools, float-then-truncate integer
//! parsing, lossy-float protection, JSON-first container parsing with a
//! delimiter fallback, and a fixed datetime format ladder.

use crate::error::{ConformError, Result};
use crate::descriptor::ScalarType;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;
use uuid::Uuid;

static LIST_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;|\n]").expect("hardcoded delimiter pattern"));

/// Datetime formats tried in order before falling back to RFC 3339.
const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%SZ",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Converts a value to the given scalar target type.
pub fn coerce(value: &Value, target: ScalarType) -> Result<Value> {
    trace!(target = target.name(), from = value.type_name(), "coercing value");
    match target {
        ScalarType::Null => match value {
            Value::Null => Ok(Value::Null),
            _ => Err(ConformError::coercion(
                "null",
                format!("cannot convert {} to null", value.type_name()),
            )),
        },
        ScalarType::Bool => to_bool(value),
        ScalarType::Int => to_int(value),
        ScalarType::Float => to_float(value),
        ScalarType::Decimal => to_decimal(value),
        ScalarType::Str => Ok(to_str(value)),
        ScalarType::Date => to_date(value),
        ScalarType::DateTime => to_datetime(value),
        ScalarType::Uuid => to_uuid(value),
    }
}

/// Strips surrounding whitespace plus thousands-separator commas and
/// internal spaces from a numeric string.
fn clean_numeric(s: &str) -> String {
    s.trim().replace([',', ' '], "")
}

/// Converts a value to an integer.
///
/// Strings accept the boolean token table (`"yes"` is 1, `"off"` is 0)
/// and are otherwise parsed as a float and truncated toward zero, so
/// `"123.9"` becomes 123. Floats convert only when they carry no
/// fractional part.
pub fn to_int(value: &Value) -> Result<Value> {
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && in_i64_range(*f) {
                Ok(Value::Int(*f as i64))
            } else {
                Err(ConformError::coercion(
                    "int",
                    format!("float {f} has a fractional part or is out of range"),
                ))
            }
        }
        Value::Decimal(d) => d.trunc().to_i64().map(Value::Int).ok_or_else(|| {
            ConformError::coercion("int", format!("decimal {d} is out of range"))
        }),
        Value::Str(s) => {
            let cleaned = clean_numeric(s);
            match cleaned.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => return Ok(Value::Int(1)),
                "false" | "no" | "off" | "0" => return Ok(Value::Int(0)),
                _ => {}
            }
            // Parsed as a float then cast: truncation, not rounding
            let f: f64 = cleaned.parse().map_err(|_| {
                ConformError::coercion("int", format!("invalid numeric literal '{s}'"))
            })?;
            if f.is_finite() && in_i64_range(f) {
                Ok(Value::Int(f.trunc() as i64))
            } else {
                Err(ConformError::coercion(
                    "int",
                    format!("numeric literal '{s}' is out of range"),
                ))
            }
        }
        _ => Err(ConformError::coercion(
            "int",
            format!("cannot convert {} to int", value.type_name()),
        )),
    }
}

fn in_i64_range(f: f64) -> bool {
    (i64::MIN as f64..=i64::MAX as f64).contains(&f)
}

/// Converts a value to a float. Strings are cleaned of thousands
/// separators and spaces before parsing.
pub fn to_float(value: &Value) -> Result<Value> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Decimal(d) => d.to_f64().map(Value::Float).ok_or_else(|| {
            ConformError::coercion("float", format!("decimal {d} is out of range"))
        }),
        Value::Str(s) => clean_numeric(s)
            .parse()
            .map(Value::Float)
            .map_err(|_| ConformError::coercion("float", format!("invalid numeric literal '{s}'"))),
        _ => Err(ConformError::coercion(
            "float",
            format!("cannot convert {} to float", value.type_name()),
        )),
    }
}

/// Converts a value to its string form. `Null` becomes the empty string.
pub fn to_str(value: &Value) -> Value {
    match value {
        Value::Null => Value::Str(String::new()),
        Value::Str(s) => Value::Str(s.clone()),
        other => Value::Str(other.to_string()),
    }
}

/// Converts a value to a boolean.
///
/// Strings are matched against explicit truthy (`true/yes/on/1/y/t`) and
/// falsy (`false/no/off/0/n/f/""`) token tables; anything else errors.
/// Non-strings use default truthiness.
pub fn to_bool(value: &Value) -> Result<Value> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" | "y" | "t" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" | "n" | "f" | "" => Ok(Value::Bool(false)),
            _ => Err(ConformError::coercion(
                "bool",
                format!("unrecognized boolean token '{s}'"),
            )),
        },
        other => Ok(Value::Bool(other.is_truthy())),
    }
}

/// Converts a value to a list.
///
/// Strings first attempt a JSON parse, used only when it yields an
/// array; otherwise the string is split on commas, semicolons, pipes, or
/// newlines, trimming and discarding empty fragments. Tuples and sets
/// become lists directly, maps become the list of their keys, and any
/// other scalar becomes a one-element list.
pub fn to_list(value: &Value) -> Result<Value> {
    match value {
        Value::List(items) => Ok(Value::List(items.clone())),
        Value::Tuple(items) | Value::Set(items) => Ok(Value::List(items.clone())),
        Value::Map(pairs) => Ok(Value::List(pairs.iter().map(|(k, _)| k.clone()).collect())),
        Value::Str(s) => {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(s.trim()) {
                if json.is_array() {
                    return Ok(Value::from(json));
                }
            }
            let fragments: Vec<Value> = LIST_DELIMITERS
                .split(s)
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .map(Value::from)
                .collect();
            Ok(Value::List(fragments))
        }
        other => Ok(Value::List(vec![other.clone()])),
    }
}

/// Converts a value to a dict.
///
/// Strings are parsed as JSON and must yield an object; a list or tuple
/// of two-element pairs builds the dict entry by entry.
pub fn to_map(value: &Value) -> Result<Value> {
    match value {
        Value::Map(pairs) => Ok(Value::Map(pairs.clone())),
        Value::Str(s) => {
            let json = serde_json::from_str::<serde_json::Value>(s.trim()).map_err(|e| {
                ConformError::coercion("dict", format!("invalid structured literal '{s}': {e}"))
            })?;
            if json.is_object() {
                Ok(Value::from(json))
            } else {
                Err(ConformError::coercion(
                    "dict",
                    format!("'{s}' did not parse as an object"),
                ))
            }
        }
        Value::List(items) | Value::Tuple(items) => {
            let mut pairs = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::List(pair) | Value::Tuple(pair) if pair.len() == 2 => {
                        pairs.push((pair[0].clone(), pair[1].clone()));
                    }
                    _ => {
                        return Err(ConformError::coercion(
                            "dict",
                            format!("element {item} is not a key/value pair"),
                        ))
                    }
                }
            }
            Ok(Value::Map(pairs))
        }
        other => Err(ConformError::coercion(
            "dict",
            format!("cannot convert {} to dict", other.type_name()),
        )),
    }
}

/// Converts a value to a tuple: lists and sets convert element-wise, any
/// other non-tuple value wraps as a one-element tuple.
pub fn to_tuple(value: &Value) -> Result<Value> {
    match value {
        Value::Tuple(items) => Ok(Value::Tuple(items.clone())),
        Value::List(items) | Value::Set(items) => Ok(Value::Tuple(items.clone())),
        other => Ok(Value::Tuple(vec![other.clone()])),
    }
}

/// Converts a value to a datetime.
///
/// Strings are tried in order against the fixed format ladder, then
/// against RFC 3339 (a trailing `Z` denotes UTC and yields a
/// timezone-aware value). Numbers are Unix timestamps (naive UTC), bare
/// dates combine with midnight.
pub fn to_datetime(value: &Value) -> Result<Value> {
    match value {
        Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
        Value::DateTimeTz(dt) => Ok(Value::DateTimeTz(*dt)),
        Value::Date(d) => Ok(Value::DateTime(d.and_time(NaiveTime::MIN))),
        Value::Int(i) => DateTime::from_timestamp(*i, 0)
            .map(|dt| Value::DateTime(dt.naive_utc()))
            .ok_or_else(|| {
                ConformError::coercion("datetime", format!("timestamp {i} is out of range"))
            }),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(ConformError::coercion(
                    "datetime",
                    format!("timestamp {f} is not finite"),
                ));
            }
            DateTime::from_timestamp_millis((f * 1000.0) as i64)
                .map(|dt| Value::DateTime(dt.naive_utc()))
                .ok_or_else(|| {
                    ConformError::coercion("datetime", format!("timestamp {f} is out of range"))
                })
        }
        Value::Str(s) => parse_datetime_str(s.trim()),
        other => Err(ConformError::coercion(
            "datetime",
            format!("cannot convert {} to datetime", other.type_name()),
        )),
    }
}

fn parse_datetime_str(s: &str) -> Result<Value> {
    for format in DATETIME_FORMATS {
        if format.contains("%H") {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Value::DateTime(dt));
            }
        } else if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Ok(Value::DateTime(d.and_time(NaiveTime::MIN)));
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(Value::DateTimeTz)
        .map_err(|_| ConformError::coercion("datetime", format!("unrecognized datetime '{s}'")))
}

/// Converts a value to a date; datetimes keep their date part.
pub fn to_date(value: &Value) -> Result<Value> {
    match value {
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::DateTime(dt) => Ok(Value::Date(dt.date())),
        Value::DateTimeTz(dt) => Ok(Value::Date(dt.date_naive())),
        Value::Str(s) => {
            let trimmed = s.trim();
            for format in DATE_FORMATS {
                if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
                    return Ok(Value::Date(d));
                }
            }
            match parse_datetime_str(trimmed)? {
                Value::DateTime(dt) => Ok(Value::Date(dt.date())),
                Value::DateTimeTz(dt) => Ok(Value::Date(dt.date_naive())),
                _ => Err(ConformError::coercion(
                    "date",
                    format!("unrecognized date '{s}'"),
                )),
            }
        }
        other => Err(ConformError::coercion(
            "date",
            format!("cannot convert {} to date", other.type_name()),
        )),
    }
}

/// Converts a value to a UUID from its textual representation,
/// stringifying non-string values first.
pub fn to_uuid(value: &Value) -> Result<Value> {
    match value {
        Value::Uuid(u) => Ok(Value::Uuid(*u)),
        Value::Str(s) => Uuid::parse_str(s.trim())
            .map(Value::Uuid)
            .map_err(|_| ConformError::coercion("uuid", format!("invalid UUID literal '{s}'"))),
        other => {
            let text = other.to_string();
            Uuid::parse_str(&text).map(Value::Uuid).map_err(|_| {
                ConformError::coercion("uuid", format!("invalid UUID literal '{text}'"))
            })
        }
    }
}

/// Converts a value to a decimal. Strings are stripped of commas first;
/// invalid literals echo the original value in the error.
pub fn to_decimal(value: &Value) -> Result<Value> {
    match value {
        Value::Decimal(d) => Ok(Value::Decimal(*d)),
        Value::Int(i) => Ok(Value::Decimal(Decimal::from(*i))),
        Value::Bool(b) => Ok(Value::Decimal(Decimal::from(i64::from(*b)))),
        Value::Float(f) => Decimal::from_f64(*f).map(Value::Decimal).ok_or_else(|| {
            ConformError::coercion("decimal", format!("float {f} is not representable"))
        }),
        Value::Str(s) => {
            let cleaned = s.trim().replace(',', "");
            Decimal::from_str(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .map(Value::Decimal)
                .map_err(|_| {
                    ConformError::coercion("decimal", format!("invalid numeric literal '{s}'"))
                })
        }
        other => Err(ConformError::coercion(
            "decimal",
            format!("cannot convert {} to decimal", other.type_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_from_strings() {
        assert_eq!(to_int(&Value::from("42")).unwrap(), Value::Int(42));
        assert_eq!(to_int(&Value::from(" 1,234 ")).unwrap(), Value::Int(1234));
        assert_eq!(to_int(&Value::from("1 234 567")).unwrap(), Value::Int(1234567));
        // Float-then-truncate, not rounding
        assert_eq!(to_int(&Value::from("123.0")).unwrap(), Value::Int(123));
        assert_eq!(to_int(&Value::from("123.9")).unwrap(), Value::Int(123));
        assert_eq!(to_int(&Value::from("-7.9")).unwrap(), Value::Int(-7));
        assert!(to_int(&Value::from("abc")).is_err());
    }

    #[test]
    fn test_int_boolean_tokens() {
        assert_eq!(to_int(&Value::from("yes")).unwrap(), Value::Int(1));
        assert_eq!(to_int(&Value::from("ON")).unwrap(), Value::Int(1));
        assert_eq!(to_int(&Value::from("off")).unwrap(), Value::Int(0));
        assert_eq!(to_int(&Value::from("False")).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_int_from_bool_and_float() {
        assert_eq!(to_int(&Value::Bool(true)).unwrap(), Value::Int(1));
        assert_eq!(to_int(&Value::Float(3.0)).unwrap(), Value::Int(3));
        // Floats with a fractional part are rejected to protect precision
        assert!(to_int(&Value::Float(3.5)).is_err());
        assert!(to_int(&Value::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_int_from_decimal_truncates() {
        assert_eq!(
            to_int(&Value::Decimal(Decimal::new(35, 1))).unwrap(), // 3.5
            Value::Int(3)
        );
    }

    #[test]
    fn test_float_from_strings() {
        assert_eq!(to_float(&Value::from("3.5")).unwrap(), Value::Float(3.5));
        assert_eq!(
            to_float(&Value::from("1,234.5")).unwrap(),
            Value::Float(1234.5)
        );
        assert!(to_float(&Value::from("x")).is_err());
    }

    #[test]
    fn test_str_conversions() {
        assert_eq!(to_str(&Value::Null), Value::Str(String::new()));
        assert_eq!(to_str(&Value::Int(5)), Value::from("5"));
        assert_eq!(to_str(&Value::Bool(false)), Value::from("false"));
    }

    #[test]
    fn test_bool_token_table() {
        for token in ["true", "YES", "on", "1", "y", "T"] {
            assert_eq!(to_bool(&Value::from(token)).unwrap(), Value::Bool(true));
        }
        for token in ["false", "No", "OFF", "0", "n", "f", ""] {
            assert_eq!(to_bool(&Value::from(token)).unwrap(), Value::Bool(false));
        }
        assert!(to_bool(&Value::from("maybe")).is_err());
    }

    #[test]
    fn test_bool_from_non_strings_uses_truthiness() {
        assert_eq!(to_bool(&Value::Int(0)).unwrap(), Value::Bool(false));
        assert_eq!(to_bool(&Value::Int(-3)).unwrap(), Value::Bool(true));
        assert_eq!(to_bool(&Value::List(vec![])).unwrap(), Value::Bool(false));
        assert_eq!(to_bool(&Value::Null).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_list_from_json_string() {
        assert_eq!(
            to_list(&Value::from("[1, 2, 3]")).unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_list_from_delimited_string() {
        assert_eq!(
            to_list(&Value::from("a, b; c |  | d\ne")).unwrap(),
            Value::List(vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("c"),
                Value::from("d"),
                Value::from("e"),
            ])
        );
    }

    #[test]
    fn test_list_from_containers_and_scalars() {
        assert_eq!(
            to_list(&Value::Tuple(vec![Value::Int(1)])).unwrap(),
            Value::List(vec![Value::Int(1)])
        );
        assert_eq!(
            to_list(&Value::Map(vec![(Value::from("k"), Value::Int(1))])).unwrap(),
            Value::List(vec![Value::from("k")])
        );
        assert_eq!(
            to_list(&Value::Int(7)).unwrap(),
            Value::List(vec![Value::Int(7)])
        );
    }

    #[test]
    fn test_map_from_json_string() {
        assert_eq!(
            to_map(&Value::from(r#"{"a": 1}"#)).unwrap(),
            Value::Map(vec![(Value::from("a"), Value::Int(1))])
        );
        assert!(to_map(&Value::from("[1, 2]")).is_err());
        assert!(to_map(&Value::from("not json")).is_err());
    }

    #[test]
    fn test_map_from_pair_sequence() {
        let pairs = Value::List(vec![
            Value::Tuple(vec![Value::from("a"), Value::Int(1)]),
            Value::Tuple(vec![Value::from("b"), Value::Int(2)]),
        ]);
        assert_eq!(
            to_map(&pairs).unwrap(),
            Value::Map(vec![
                (Value::from("a"), Value::Int(1)),
                (Value::from("b"), Value::Int(2)),
            ])
        );
        assert!(to_map(&Value::List(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn test_tuple_wrapping() {
        assert_eq!(
            to_tuple(&Value::List(vec![Value::Int(1), Value::Int(2)])).unwrap(),
            Value::Tuple(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            to_tuple(&Value::Int(5)).unwrap(),
            Value::Tuple(vec![Value::Int(5)])
        );
        assert_eq!(
            to_tuple(&Value::from("ab")).unwrap(),
            Value::Tuple(vec![Value::from("ab")])
        );
    }

    #[test]
    fn test_datetime_format_ladder() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            to_datetime(&Value::from("2024-03-15 10:30:00")).unwrap(),
            Value::DateTime(expected)
        );
        assert_eq!(
            to_datetime(&Value::from("2024-03-15T10:30:00")).unwrap(),
            Value::DateTime(expected)
        );
        assert_eq!(
            to_datetime(&Value::from("2024-03-15T10:30:00Z")).unwrap(),
            Value::DateTime(expected)
        );
    }

    #[test]
    fn test_datetime_bare_dates_get_midnight() {
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_time(NaiveTime::MIN);
        for text in ["2024-03-15", "03/15/2024", "15.03.2024"] {
            assert_eq!(
                to_datetime(&Value::from(text)).unwrap(),
                Value::DateTime(midnight),
                "failed for {text}"
            );
        }
    }

    #[test]
    fn test_datetime_rfc3339_fallback_keeps_offset() {
        let value = to_datetime(&Value::from("2024-03-15T10:30:00+02:00")).unwrap();
        match value {
            Value::DateTimeTz(dt) => assert_eq!(dt.to_rfc3339(), "2024-03-15T10:30:00+02:00"),
            other => panic!("expected timezone-aware datetime, got {other:?}"),
        }
    }

    #[test]
    fn test_datetime_from_timestamps() {
        assert_eq!(
            to_datetime(&Value::Int(0)).unwrap(),
            Value::DateTime(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_time(NaiveTime::MIN))
        );
        let halfway = to_datetime(&Value::Float(0.5)).unwrap();
        match halfway {
            Value::DateTime(dt) => assert_eq!(dt.and_utc().timestamp_millis(), 500),
            other => panic!("expected naive datetime, got {other:?}"),
        }
        assert!(to_datetime(&Value::from("not a date")).is_err());
        assert!(to_datetime(&Value::List(vec![])).is_err());
    }

    #[test]
    fn test_date_conversions() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(to_date(&Value::from("2024-03-15")).unwrap(), Value::Date(date));
        assert_eq!(
            to_date(&Value::DateTime(date.and_hms_opt(8, 0, 0).unwrap())).unwrap(),
            Value::Date(date)
        );
        assert!(to_date(&Value::from("32.13.2024")).is_err());
    }

    #[test]
    fn test_uuid_parsing() {
        let text = "550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(
            to_uuid(&Value::from(text)).unwrap(),
            Value::Uuid(Uuid::parse_str(text).unwrap())
        );
        assert!(to_uuid(&Value::from("not-a-uuid")).is_err());
        assert!(to_uuid(&Value::Int(5)).is_err());
    }

    #[test]
    fn test_decimal_parsing() {
        assert_eq!(
            to_decimal(&Value::from("1,234.56")).unwrap(),
            Value::Decimal(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            to_decimal(&Value::Int(7)).unwrap(),
            Value::Decimal(Decimal::from(7))
        );
        let err = to_decimal(&Value::from("12x")).unwrap_err();
        assert!(err.to_string().contains("12x"));
    }
}
