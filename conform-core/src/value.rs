//! The runtime value model validated by the engine.
//!
//! `Value` is an explicit tagged representation of a dynamically shaped
//! value: scalars, temporal types, identifiers, and the usual nestable
//! containers. The checker, the coercion policies, and the boundary
//! validators all operate on this one type.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A dynamically typed runtime value.
///
/// Container variants preserve insertion order; `Map` in particular is a
/// sequence of key/value pairs so that keys of any type can be validated
/// and coerced individually.
///
/// # Examples
///
/// ```rust
/// use conform_core::value::Value;
///
/// let v = Value::from(42);
/// assert!(v.is_numeric());
/// assert_eq!(v.type_name(), "int");
///
/// let items = Value::List(vec![Value::from(1), Value::from("two")]);
/// assert_eq!(items.len(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The absent value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
    /// UTF-8 string
    Str(String),
    /// Calendar date without a time component
    Date(NaiveDate),
    /// Naive datetime (no timezone offset)
    DateTime(NaiveDateTime),
    /// Timezone-aware datetime
    DateTimeTz(DateTime<FixedOffset>),
    /// UUID
    Uuid(Uuid),
    /// Ordered, growable sequence
    List(Vec<Value>),
    /// Fixed-shape sequence
    Tuple(Vec<Value>),
    /// Unordered collection (kept in insertion order)
    Set(Vec<Value>),
    /// Key/value pairs in insertion order; keys may be any value
    Map(Vec<(Value, Value)>),
}

/// The kind tag of a [`Value`], used for type gates and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Str,
    Date,
    DateTime,
    DateTimeTz,
    Uuid,
    List,
    Tuple,
    Set,
    Map,
}

impl ValueKind {
    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Decimal => "decimal",
            ValueKind::Str => "str",
            ValueKind::Date => "date",
            ValueKind::DateTime | ValueKind::DateTimeTz => "datetime",
            ValueKind::Uuid => "uuid",
            ValueKind::List => "list",
            ValueKind::Tuple => "tuple",
            ValueKind::Set => "set",
            ValueKind::Map => "dict",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Value {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Str(_) => ValueKind::Str,
            Value::Date(_) => ValueKind::Date,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::DateTimeTz(_) => ValueKind::DateTimeTz,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::List(_) => ValueKind::List,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Set(_) => ValueKind::Set,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Returns the human-readable type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns true for the numeric variants (`Int`, `Float`, `Decimal`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Returns the numeric value widened to `f64`, when numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Returns the length of a sized value.
    ///
    /// Strings count characters, containers count elements (pairs for
    /// maps). Unsized values return `None`.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.len()),
            Value::Map(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    /// Returns true when the value is sized and empty.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Default truthiness of a value.
    ///
    /// `Null`, `false`, zero numerics, and empty strings or containers are
    /// falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Decimal(d) => !d.is_zero(),
            Value::Str(s) => !s.is_empty(),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => !items.is_empty(),
            Value::Map(pairs) => !pairs.is_empty(),
            Value::Date(_) | Value::DateTime(_) | Value::DateTimeTz(_) | Value::Uuid(_) => true,
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::DateTimeTz(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::List(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items)?;
                write!(f, ")")
            }
            Value::Set(items) => {
                write!(f, "{{")?;
                write_joined(f, items)?;
                write!(f, "}}")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTimeTz(dt)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
