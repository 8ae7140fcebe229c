//! Membership constraint against a set of allowed values.

use crate::constraints::Constraint;
use crate::value::Value;
use std::collections::HashSet;

/// A constraint that checks membership in an allowed set of values.
///
/// Membership is structural equality over [`Value`]. When configured
/// case-insensitively, a string value also matches if its lowercased form
/// equals the lowercased form of any string choice; the lowercase lookup
/// table is built once at construction.
///
/// # Examples
///
/// ```rust
/// use conform_core::constraints::{ChoiceConstraint, Constraint};
/// use conform_core::value::Value;
///
/// let color = ChoiceConstraint::new(vec![
///     Value::from("red"),
///     Value::from("green"),
///     Value::from("blue"),
/// ]);
/// assert!(color.validate(&Value::from("red")));
/// assert!(!color.validate(&Value::from("Red")));
///
/// let relaxed = color.case_insensitive();
/// assert!(relaxed.validate(&Value::from("Red")));
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceConstraint {
    choices: Vec<Value>,
    case_sensitive: bool,
    lowercase_choices: HashSet<String>,
    error_message: Option<String>,
}

impl ChoiceConstraint {
    /// Creates a case-sensitive choice constraint.
    pub fn new(choices: Vec<Value>) -> Self {
        Self {
            choices,
            case_sensitive: true,
            lowercase_choices: HashSet::new(),
            error_message: None,
        }
    }

    /// Makes string membership case-insensitive.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self.lowercase_choices = self
            .choices
            .iter()
            .filter_map(|choice| match choice {
                Value::Str(s) => Some(s.to_lowercase()),
                _ => None,
            })
            .collect();
        self
    }

    /// Overrides the templated failure message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    fn sorted_choice_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.choices.iter().map(Value::to_string).collect();
        names.sort();
        names
    }
}

impl Constraint for ChoiceConstraint {
    fn validate(&self, value: &Value) -> bool {
        if self.choices.contains(value) {
            return true;
        }
        if !self.case_sensitive {
            if let Value::Str(s) = value {
                return self.lowercase_choices.contains(&s.to_lowercase());
            }
        }
        false
    }

    fn message(&self, value: &Value) -> String {
        if let Some(message) = &self.error_message {
            return message.clone();
        }
        format!(
            "Value {} is not one of the allowed choices: {}",
            value,
            self.sorted_choice_names().join(", ")
        )
    }

    fn name(&self) -> &str {
        "choice"
    }
}
