//! Regex pattern constraint for string values.

use crate::constraints::Constraint;
use crate::value::Value;
use regex::Regex;

/// A constraint that searches a string value for a regex pattern.
///
/// With `must_match` (the default) the pattern must be found somewhere in
/// the value; inverted, the pattern must NOT be found. Non-string values
/// never satisfy the constraint. Case-insensitivity and other flags are
/// part of the compiled regex (`(?i)` or `RegexBuilder`).
///
/// # Examples
///
/// ```rust
/// use conform_core::constraints::{Constraint, PatternConstraint};
/// use conform_core::value::Value;
/// use regex::Regex;
///
/// let has_digit = PatternConstraint::new(Regex::new(r"\d").unwrap());
/// assert!(has_digit.validate(&Value::from("a1")));
/// assert!(!has_digit.validate(&Value::from("abc")));
///
/// let no_spaces = PatternConstraint::must_not_match(Regex::new(r"\s").unwrap());
/// assert!(no_spaces.validate(&Value::from("compact")));
/// ```
#[derive(Debug, Clone)]
pub struct PatternConstraint {
    pattern: Regex,
    must_match: bool,
    error_message: Option<String>,
}

impl PatternConstraint {
    /// Creates a constraint requiring the pattern to be found.
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            must_match: true,
            error_message: None,
        }
    }

    /// Creates a constraint requiring the pattern NOT to be found.
    pub fn must_not_match(pattern: Regex) -> Self {
        Self {
            pattern,
            must_match: false,
            error_message: None,
        }
    }

    /// Overrides the templated failure message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

impl Constraint for PatternConstraint {
    fn validate(&self, value: &Value) -> bool {
        let s = match value {
            Value::Str(s) => s,
            _ => return false,
        };
        let found = self.pattern.is_match(s);
        if self.must_match {
            found
        } else {
            !found
        }
    }

    fn message(&self, value: &Value) -> String {
        if let Some(message) = &self.error_message {
            return message.clone();
        }
        if !matches!(value, Value::Str(_)) {
            return format!("Value of type {} is not a string", value.type_name());
        }
        if self.must_match {
            format!(
                "Value '{}' must match pattern '{}'",
                value,
                self.pattern.as_str()
            )
        } else {
            format!(
                "Value '{}' must not match pattern '{}'",
                value,
                self.pattern.as_str()
            )
        }
    }

    fn name(&self) -> &str {
        "pattern"
    }
}
