//! Type descriptors: the expected-type half of a check.
//!
//! A [`TypeDescriptor`] is an explicit tagged description of a possibly
//! composite type: a scalar, a parameterized container, a union of
//! alternatives, or a set of literal values. Callers construct descriptors
//! directly; the checker pattern-matches on them instead of reflecting
//! over generic syntax.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The scalar (non-composite) types a value can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Str,
    Date,
    DateTime,
    Uuid,
}

impl ScalarType {
    /// Returns a human-readable name for this scalar type.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Null => "null",
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Decimal => "decimal",
            ScalarType::Str => "str",
            ScalarType::Date => "date",
            ScalarType::DateTime => "datetime",
            ScalarType::Uuid => "uuid",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A possibly composite description of an expected type.
///
/// Container descriptors carry optional parameters: a bare `list`/`dict`/
/// `tuple` (parameter `None`) checks only the container shape and skips
/// element-level checks.
///
/// # Examples
///
/// ```rust
/// use conform_core::descriptor::TypeDescriptor;
///
/// let ints = TypeDescriptor::list_of(TypeDescriptor::INT);
/// assert_eq!(ints.to_string(), "list[int]");
///
/// let lookup = TypeDescriptor::map_of(TypeDescriptor::STR, TypeDescriptor::FLOAT);
/// assert_eq!(lookup.to_string(), "dict[str, float]");
///
/// let id = TypeDescriptor::union(vec![TypeDescriptor::INT, TypeDescriptor::UUID]);
/// assert_eq!(id.to_string(), "int | uuid");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// A plain scalar type
    Scalar(ScalarType),
    /// A list, optionally parameterized by an element type
    List(Option<Box<TypeDescriptor>>),
    /// A dict, optionally parameterized by key and value types
    Map(Option<Box<(TypeDescriptor, TypeDescriptor)>>),
    /// A tuple, optionally with a fixed arity of positional types
    Tuple(Option<Vec<TypeDescriptor>>),
    /// Any one of the member types, tried in declaration order
    Union(Vec<TypeDescriptor>),
    /// Exactly one of the listed values, compared without coercion
    Literal(Vec<Value>),
}

impl TypeDescriptor {
    pub const NULL: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Null);
    pub const BOOL: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Bool);
    pub const INT: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Int);
    pub const FLOAT: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Float);
    pub const DECIMAL: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Decimal);
    pub const STR: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Str);
    pub const DATE: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Date);
    pub const DATETIME: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::DateTime);
    pub const UUID: TypeDescriptor = TypeDescriptor::Scalar(ScalarType::Uuid);

    /// A bare list descriptor; element checks are skipped.
    pub fn list() -> Self {
        TypeDescriptor::List(None)
    }

    /// A list whose elements must each satisfy `element`.
    pub fn list_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Some(Box::new(element)))
    }

    /// A bare dict descriptor; pair checks are skipped.
    pub fn map() -> Self {
        TypeDescriptor::Map(None)
    }

    /// A dict whose keys and values must satisfy `key` and `value`.
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Some(Box::new((key, value))))
    }

    /// A bare tuple descriptor; arity and positional checks are skipped.
    pub fn tuple() -> Self {
        TypeDescriptor::Tuple(None)
    }

    /// A tuple with fixed arity whose positions must satisfy `elements`.
    pub fn tuple_of(elements: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Tuple(Some(elements))
    }

    /// A union of alternative types, tried in declaration order.
    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Union(members)
    }

    /// A literal set of allowed values.
    pub fn literal(values: Vec<Value>) -> Self {
        TypeDescriptor::Literal(values)
    }

    /// The descriptor matching a value's own runtime kind.
    ///
    /// Containers map to their bare descriptors (sets coerce to lists), so
    /// checking a value against `for_value(&value)` can only surface
    /// constraint failures, never a type mismatch.
    pub fn for_value(value: &Value) -> Self {
        match value {
            Value::Null => TypeDescriptor::NULL,
            Value::Bool(_) => TypeDescriptor::BOOL,
            Value::Int(_) => TypeDescriptor::INT,
            Value::Float(_) => TypeDescriptor::FLOAT,
            Value::Decimal(_) => TypeDescriptor::DECIMAL,
            Value::Str(_) => TypeDescriptor::STR,
            Value::Date(_) => TypeDescriptor::DATE,
            Value::DateTime(_) | Value::DateTimeTz(_) => TypeDescriptor::DATETIME,
            Value::Uuid(_) => TypeDescriptor::UUID,
            Value::List(_) | Value::Set(_) => TypeDescriptor::list(),
            Value::Tuple(_) => TypeDescriptor::tuple(),
            Value::Map(_) => TypeDescriptor::map(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(s) => write!(f, "{s}"),
            TypeDescriptor::List(None) => write!(f, "list"),
            TypeDescriptor::List(Some(element)) => write!(f, "list[{element}]"),
            TypeDescriptor::Map(None) => write!(f, "dict"),
            TypeDescriptor::Map(Some(entry)) => write!(f, "dict[{}, {}]", entry.0, entry.1),
            TypeDescriptor::Tuple(None) => write!(f, "tuple"),
            TypeDescriptor::Tuple(Some(elements)) => {
                write!(f, "tuple[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            TypeDescriptor::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            TypeDescriptor::Literal(values) => {
                write!(f, "literal[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}
