//! Numeric range constraint with configurable bound inclusivity.

use crate::constraints::Constraint;
use crate::value::Value;

/// A constraint that checks a numeric value against lower and upper bounds.
///
/// Each bound is optional and inclusive by default. Non-numeric values
/// never satisfy the constraint.
///
/// # Examples
///
/// ```rust
/// use conform_core::constraints::{Constraint, RangeConstraint};
/// use conform_core::value::Value;
///
/// let percentage = RangeConstraint::between(0.0, 100.0);
/// assert!(percentage.validate(&Value::Int(50)));
/// assert!(!percentage.validate(&Value::Float(100.5)));
///
/// // Exclusive lower bound: 5 itself is rejected
/// let above_five = RangeConstraint::min(5.0).with_exclusive_min();
/// assert!(!above_five.validate(&Value::Int(5)));
/// assert!(above_five.validate(&Value::Float(5.0001)));
/// ```
#[derive(Debug, Clone)]
pub struct RangeConstraint {
    min_value: Option<f64>,
    max_value: Option<f64>,
    inclusive_min: bool,
    inclusive_max: bool,
    error_message: Option<String>,
}

impl RangeConstraint {
    /// Creates a range constraint with the given optional bounds.
    ///
    /// When both bounds are given, callers are responsible for keeping
    /// `min_value <= max_value`.
    pub fn new(min_value: Option<f64>, max_value: Option<f64>) -> Self {
        Self {
            min_value,
            max_value,
            inclusive_min: true,
            inclusive_max: true,
            error_message: None,
        }
    }

    /// Creates a lower-bound-only constraint.
    pub fn min(min_value: f64) -> Self {
        Self::new(Some(min_value), None)
    }

    /// Creates an upper-bound-only constraint.
    pub fn max(max_value: f64) -> Self {
        Self::new(None, Some(max_value))
    }

    /// Creates a constraint with both bounds set.
    pub fn between(min_value: f64, max_value: f64) -> Self {
        Self::new(Some(min_value), Some(max_value))
    }

    /// Makes the lower bound exclusive (`>` instead of `>=`).
    pub fn with_exclusive_min(mut self) -> Self {
        self.inclusive_min = false;
        self
    }

    /// Makes the upper bound exclusive (`<` instead of `<=`).
    pub fn with_exclusive_max(mut self) -> Self {
        self.inclusive_max = false;
        self
    }

    /// Overrides the templated failure message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    fn bound_descriptions(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(min) = self.min_value {
            let op = if self.inclusive_min { ">=" } else { ">" };
            parts.push(format!("{op} {min}"));
        }
        if let Some(max) = self.max_value {
            let op = if self.inclusive_max { "<=" } else { "<" };
            parts.push(format!("{op} {max}"));
        }
        parts
    }
}

impl Constraint for RangeConstraint {
    fn validate(&self, value: &Value) -> bool {
        let n = match value.as_f64() {
            Some(n) => n,
            None => return false,
        };
        if let Some(min) = self.min_value {
            let ok = if self.inclusive_min { n >= min } else { n > min };
            if !ok {
                return false;
            }
        }
        if let Some(max) = self.max_value {
            let ok = if self.inclusive_max { n <= max } else { n < max };
            if !ok {
                return false;
            }
        }
        true
    }

    fn message(&self, value: &Value) -> String {
        if let Some(message) = &self.error_message {
            return message.clone();
        }
        if !value.is_numeric() {
            return format!("Value of type {} is not numeric", value.type_name());
        }
        format!(
            "Value {} violates constraint: must be {}",
            value,
            self.bound_descriptions().join(" and ")
        )
    }

    fn name(&self) -> &str {
        "range"
    }
}
