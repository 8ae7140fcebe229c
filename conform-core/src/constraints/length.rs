//! Length constraint for strings and containers.

use crate::constraints::Constraint;
use crate::value::Value;

/// A constraint that checks the length of a sized value.
///
/// Applies to strings (character count) and containers (element count).
/// When an exact length is configured it is the sole criterion and the
/// min/max bounds are ignored. Values without a length never satisfy the
/// constraint.
///
/// # Examples
///
/// ```rust
/// use conform_core::constraints::{Constraint, LengthConstraint};
/// use conform_core::value::Value;
///
/// let username = LengthConstraint::between(3, 20);
/// assert!(username.validate(&Value::from("ada")));
/// assert!(!username.validate(&Value::from("ab")));
///
/// let pin = LengthConstraint::exactly(4);
/// assert!(pin.validate(&Value::from("1234")));
/// ```
#[derive(Debug, Clone)]
pub struct LengthConstraint {
    min_length: Option<usize>,
    max_length: Option<usize>,
    exact_length: Option<usize>,
    error_message: Option<String>,
}

impl LengthConstraint {
    /// Creates a length constraint with the given optional bounds.
    pub fn new(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Self {
            min_length,
            max_length,
            exact_length: None,
            error_message: None,
        }
    }

    /// Creates a minimum length constraint.
    pub fn min(min_length: usize) -> Self {
        Self::new(Some(min_length), None)
    }

    /// Creates a maximum length constraint.
    pub fn max(max_length: usize) -> Self {
        Self::new(None, Some(max_length))
    }

    /// Creates a constraint with both bounds set (inclusive).
    pub fn between(min_length: usize, max_length: usize) -> Self {
        Self::new(Some(min_length), Some(max_length))
    }

    /// Creates a constraint that requires an exact length.
    ///
    /// An exact length takes precedence over any min/max bounds.
    pub fn exactly(length: usize) -> Self {
        Self {
            min_length: None,
            max_length: None,
            exact_length: Some(length),
            error_message: None,
        }
    }

    /// Overrides the templated failure message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    fn bound_descriptions(&self) -> Vec<String> {
        if let Some(exact) = self.exact_length {
            return vec![format!("exactly {exact}")];
        }
        let mut parts = Vec::new();
        if let Some(min) = self.min_length {
            parts.push(format!("min {min}"));
        }
        if let Some(max) = self.max_length {
            parts.push(format!("max {max}"));
        }
        parts
    }
}

impl Constraint for LengthConstraint {
    fn validate(&self, value: &Value) -> bool {
        let len = match value.len() {
            Some(len) => len,
            None => return false,
        };
        if let Some(exact) = self.exact_length {
            return len == exact;
        }
        if self.min_length.is_some_and(|min| len < min) {
            return false;
        }
        if self.max_length.is_some_and(|max| len > max) {
            return false;
        }
        true
    }

    fn message(&self, value: &Value) -> String {
        if let Some(message) = &self.error_message {
            return message.clone();
        }
        match value.len() {
            Some(len) => format!(
                "Length {} violates constraint: {}",
                len,
                self.bound_descriptions().join(" and ")
            ),
            None => format!("Value of type {} has no length", value.type_name()),
        }
    }

    fn name(&self) -> &str {
        "length"
    }
}
