//! # Conform - Runtime Type Checking for Rust
//!
//! Conform is a runtime type-checking and boundary-validation library for
//! dynamically shaped values: data deserialized from configuration files,
//! model output, user input, or any other source whose shape is only
//! known at runtime. It checks values against composite type
//! descriptors, coerces them under explicit per-type policies, and
//! collects human-readable error messages instead of failing on the
//! first problem.
//!
//! ## Quick Start
//!
//! ```rust
//! use conform_core::prelude::*;
//!
//! # fn main() -> conform_core::error::Result<()> {
//! let checker = TypeChecker::new();
//!
//! // Scalars coerce under documented policies: "42" becomes 42
//! let result = checker.check_type(&Value::from("42"), &TypeDescriptor::INT, &[])?;
//! assert!(result.valid);
//! assert_eq!(result.value, Value::Int(42));
//!
//! // Composite descriptors check (and coerce) every element, reporting
//! // per-index failures while keeping the partially coerced value
//! let scores = Value::List(vec![Value::from("1"), Value::from("2"), Value::from("x")]);
//! let result = checker.check_type(&scores, &TypeDescriptor::list_of(TypeDescriptor::INT), &[])?;
//! assert!(!result.valid);
//! assert_eq!(result.errors.len(), 1);
//!
//! // Constraints apply after type conformance; every failure is reported
//! let result = checker.check_type(
//!     &Value::from("hello"),
//!     &TypeDescriptor::STR,
//!     &[&LengthConstraint::between(3, 10)],
//! )?;
//! assert!(result.valid);
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Features
//!
//! ### Composite type descriptors
//!
//! Expected types are explicit tagged values, decomposed recursively:
//!
//! - **Scalars**: `int`, `float`, `bool`, `str`, `decimal`, `date`,
//!   `datetime`, `uuid`, `null`
//! - **Containers**: `list[T]`, `dict[K, V]`, `tuple[T1, T2, ...]`, each
//!   also usable bare to skip element checks
//! - **Unions**: alternatives tried in declaration order, structural
//!   matches preferred over coercion
//! - **Literals**: exact membership, never coerced
//!
//! ### Explicit coercion policies
//!
//! Conversion is policy, not guesswork: boolean token tables
//! (`"yes"`/`"off"`), float-then-truncate integer parsing, lossy-float
//! protection, JSON-first list and dict parsing with a delimiter
//! fallback, a fixed datetime format ladder, and Unix-timestamp
//! datetimes. See the [`coerce`] module.
//!
//! ### Boundary validation
//!
//! Category-bundled checks for numeric, string, collection, and datetime
//! values, plus a registry for custom validators:
//!
//! ```rust
//! use conform_core::prelude::*;
//!
//! let checker = TypeChecker::new();
//! let report = checker.validate_boundaries(
//!     &Value::Float(f64::INFINITY),
//!     &BoundarySpec::Numeric(NumericBounds::new()),
//! );
//! assert!(!report.valid);
//! ```
//!
//! ## Architecture
//!
//! - **[`value`]**: the tagged runtime value model
//! - **[`descriptor`]**: composite type descriptors
//! - **[`checker`]**: the `TypeChecker` engine and one-shot helpers
//! - **[`coerce`]**: per-target conversion policies
//! - **[`constraints`]**: composable predicate-plus-message objects
//! - **[`boundary`]**: category-specific boundary validators
//! - **[`error`]**: the error enum and `Result` alias

pub mod boundary;
pub mod checker;
pub mod coerce;
pub mod constraints;
pub mod descriptor;
pub mod error;
pub mod prelude;
pub mod value;
