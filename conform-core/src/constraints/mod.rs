//! Built-in constraint implementations applied after type conformance.
//!
//! A constraint is a single checkable condition plus its failure message,
//! independent of the engine that applies it. Constraints compose freely:
//! the checker evaluates every supplied constraint in order and reports
//! every failure, it never short-circuits on the first one.
//!
//! ## Built-in constraints
//!
//! - [`RangeConstraint`] — numeric bounds with configurable inclusivity
//! - [`LengthConstraint`] — minimum/maximum/exact length of sized values
//! - [`PatternConstraint`] — regex must (or must not) be found in a string
//! - [`ChoiceConstraint`] — membership in an allowed set of values
//!
//! ## Example
//!
//! ```rust
//! use conform_core::constraints::{Constraint, LengthConstraint, PatternConstraint};
//! use conform_core::value::Value;
//! use regex::Regex;
//!
//! let username = Value::from("ada_lovelace");
//! let length = LengthConstraint::between(3, 20);
//! let shape = PatternConstraint::new(Regex::new(r"^[a-z_]+$").unwrap());
//!
//! assert!(length.validate(&username));
//! assert!(shape.validate(&username));
//! ```

mod choice;
mod length;
mod pattern;
mod range;

pub use choice::ChoiceConstraint;
pub use length::LengthConstraint;
pub use pattern::PatternConstraint;
pub use range::RangeConstraint;

use crate::value::Value;
use std::fmt::Debug;

/// A validation constraint that can be evaluated against a single value.
///
/// Implementations must be stateless after construction and reusable
/// across many checks. `validate` must not panic for well-typed inputs of
/// the kind it documents; the engine treats constraints as untrusted
/// caller plugins and isolates panics regardless.
pub trait Constraint: Debug + Send + Sync {
    /// Evaluates the constraint against the value.
    fn validate(&self, value: &Value) -> bool;

    /// Returns the failure message for the value.
    ///
    /// Implementations fall back to a constraint-specific templated
    /// message when no override was configured.
    fn message(&self, value: &Value) -> String;

    /// Returns the name of the constraint.
    fn name(&self) -> &str;
}

/// A boxed constraint for use in collections.
pub type BoxedConstraint = Box<dyn Constraint>;
