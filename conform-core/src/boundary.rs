//! Boundary validators: category-specific checks expressed as options.
//!
//! Unlike [`Constraint`](crate::constraints::Constraint) objects, which
//! compose one predicate at a time, boundary validation bundles the usual
//! checks for a category of value (numeric, string, collection, datetime)
//! into a single options struct. Dispatch goes through the closed
//! [`BoundarySpec`] enum, with a string-keyed registry as the extension
//! point for custom validators.
//!
//! Every built-in category fails fast with a single type-mismatch message
//! when the value's basic type-gate fails, without attempting the
//! detailed sub-checks.

use crate::value::Value;
use chrono::{NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A custom boundary validator: returns the failure messages for a value.
pub type BoundaryValidatorFn =
    Box<dyn Fn(&Value, &serde_json::Map<String, serde_json::Value>) -> Vec<String> + Send + Sync>;

/// The outcome of a boundary or convenience check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryReport {
    /// True when no check failed
    pub valid: bool,
    /// One message per failed check
    pub errors: Vec<String>,
}

impl BoundaryReport {
    /// Creates a passing report.
    pub fn pass() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failing report with a single message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
        }
    }

    /// Creates a report from collected messages; valid when empty.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// The boundary-check category to apply, with its options.
pub enum BoundarySpec {
    /// Numeric range/sign/finiteness/precision checks
    Numeric(NumericBounds),
    /// String length/pattern/charset checks
    String(StringBounds),
    /// Collection size/duplicate/empty-item checks
    Collection(CollectionBounds),
    /// Date range/timezone/tense checks
    DateTime(DateTimeBounds),
    /// A validator registered via `register_validator`, with free-form
    /// parameters passed through to it
    Custom {
        name: String,
        params: serde_json::Map<String, serde_json::Value>,
    },
}

impl BoundarySpec {
    /// Creates a custom spec with no parameters.
    pub fn custom(name: impl Into<String>) -> Self {
        BoundarySpec::Custom {
            name: name.into(),
            params: serde_json::Map::new(),
        }
    }
}

/// Options for numeric boundary validation.
///
/// `finite_only` defaults to true: IEEE infinities and NaN are rejected
/// unless explicitly allowed.
#[derive(Debug, Clone)]
pub struct NumericBounds {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub positive_only: bool,
    pub non_negative: bool,
    pub finite_only: bool,
    /// Maximum allowed fractional digits, counted in the display form
    pub decimal_precision: Option<u32>,
}

impl Default for NumericBounds {
    fn default() -> Self {
        Self {
            min_value: None,
            max_value: None,
            positive_only: false,
            non_negative: false,
            finite_only: true,
            decimal_precision: None,
        }
    }
}

impl NumericBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn positive_only(mut self) -> Self {
        self.positive_only = true;
        self
    }

    pub fn non_negative(mut self) -> Self {
        self.non_negative = true;
        self
    }

    pub fn allow_non_finite(mut self) -> Self {
        self.finite_only = false;
        self
    }

    pub fn with_decimal_precision(mut self, digits: u32) -> Self {
        self.decimal_precision = Some(digits);
        self
    }
}

/// Options for string boundary validation.
#[derive(Debug, Clone, Default)]
pub struct StringBounds {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Every pattern must be found somewhere in the value
    pub required_patterns: Vec<Regex>,
    /// No pattern may be found anywhere in the value
    pub forbidden_patterns: Vec<Regex>,
    pub ascii_only: bool,
    pub alphanumeric_only: bool,
}

impl StringBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn require_pattern(mut self, pattern: Regex) -> Self {
        self.required_patterns.push(pattern);
        self
    }

    pub fn forbid_pattern(mut self, pattern: Regex) -> Self {
        self.forbidden_patterns.push(pattern);
        self
    }

    pub fn ascii_only(mut self) -> Self {
        self.ascii_only = true;
        self
    }

    pub fn alphanumeric_only(mut self) -> Self {
        self.alphanumeric_only = true;
        self
    }
}

/// Options for collection boundary validation.
#[derive(Debug, Clone, Default)]
pub struct CollectionBounds {
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
    /// Lists and tuples only: compares the element count against the
    /// count of distinct display forms, so `1` and `"1"` collide
    pub no_duplicates: bool,
    /// Reports the indices of falsy elements
    pub no_empty_items: bool,
}

impl CollectionBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn no_duplicates(mut self) -> Self {
        self.no_duplicates = true;
        self
    }

    pub fn no_empty_items(mut self) -> Self {
        self.no_empty_items = true;
        self
    }
}

/// Options for datetime boundary validation.
#[derive(Debug, Clone, Default)]
pub struct DateTimeBounds {
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    /// Only timezone-aware datetimes pass
    pub require_timezone: bool,
    pub future_only: bool,
    pub past_only: bool,
}

impl DateTimeBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_date(mut self, min_date: NaiveDateTime) -> Self {
        self.min_date = Some(min_date);
        self
    }

    pub fn with_max_date(mut self, max_date: NaiveDateTime) -> Self {
        self.max_date = Some(max_date);
        self
    }

    pub fn require_timezone(mut self) -> Self {
        self.require_timezone = true;
        self
    }

    pub fn future_only(mut self) -> Self {
        self.future_only = true;
        self
    }

    pub fn past_only(mut self) -> Self {
        self.past_only = true;
        self
    }
}

/// Checks a numeric value against [`NumericBounds`].
pub fn check_numeric_bounds(value: &Value, bounds: &NumericBounds) -> Vec<String> {
    let n = match value.as_f64() {
        Some(n) if value.is_numeric() => n,
        _ => {
            return vec![format!(
                "Expected a numeric value, got {}",
                value.type_name()
            )]
        }
    };
    let mut errors = Vec::new();
    if bounds.finite_only && !n.is_finite() {
        errors.push(format!("Value {n} must be finite"));
    }
    if let Some(min) = bounds.min_value {
        if n < min {
            errors.push(format!("Value {n} is below minimum {min}"));
        }
    }
    if let Some(max) = bounds.max_value {
        if n > max {
            errors.push(format!("Value {n} is above maximum {max}"));
        }
    }
    if bounds.positive_only && n <= 0.0 {
        errors.push(format!("Value {n} must be positive"));
    }
    if bounds.non_negative && n < 0.0 {
        errors.push(format!("Value {n} must be non-negative"));
    }
    if let Some(precision) = bounds.decimal_precision {
        let digits = fractional_digits(value);
        if digits > precision {
            errors.push(format!(
                "Value {value} has {digits} fractional digits, maximum is {precision}"
            ));
        }
    }
    errors
}

/// Counts the digits after the decimal point in the display form.
fn fractional_digits(value: &Value) -> u32 {
    let text = value.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.chars().filter(|c| c.is_ascii_digit()).count() as u32,
        None => 0,
    }
}

/// Checks a string value against [`StringBounds`].
pub fn check_string_bounds(value: &Value, bounds: &StringBounds) -> Vec<String> {
    let s = match value {
        Value::Str(s) => s,
        _ => {
            return vec![format!(
                "Expected a string value, got {}",
                value.type_name()
            )]
        }
    };
    let mut errors = Vec::new();
    let length = s.chars().count();
    if let Some(min) = bounds.min_length {
        if length < min {
            errors.push(format!("Length {length} is below minimum {min}"));
        }
    }
    if let Some(max) = bounds.max_length {
        if length > max {
            errors.push(format!("Length {length} is above maximum {max}"));
        }
    }
    for pattern in &bounds.required_patterns {
        if !pattern.is_match(s) {
            errors.push(format!("Required pattern '{}' not found", pattern.as_str()));
        }
    }
    for pattern in &bounds.forbidden_patterns {
        if pattern.is_match(s) {
            errors.push(format!("Forbidden pattern '{}' found", pattern.as_str()));
        }
    }
    if bounds.ascii_only && !s.is_ascii() {
        errors.push("Value must contain only ASCII characters".to_string());
    }
    if bounds.alphanumeric_only && !s.chars().all(char::is_alphanumeric) {
        errors.push("Value must contain only alphanumeric characters".to_string());
    }
    errors
}

/// Checks a sized value against [`CollectionBounds`].
pub fn check_collection_bounds(value: &Value, bounds: &CollectionBounds) -> Vec<String> {
    let size = match value.len() {
        Some(size) => size,
        None => {
            return vec![format!(
                "Expected a sized collection, got {}",
                value.type_name()
            )]
        }
    };
    let mut errors = Vec::new();
    if let Some(min) = bounds.min_size {
        if size < min {
            errors.push(format!("Size {size} is below minimum {min}"));
        }
    }
    if let Some(max) = bounds.max_size {
        if size > max {
            errors.push(format!("Size {size} is above maximum {max}"));
        }
    }
    if bounds.no_duplicates {
        if let Value::List(items) | Value::Tuple(items) = value {
            let distinct: HashSet<String> = items.iter().map(Value::to_string).collect();
            if distinct.len() != items.len() {
                errors.push("Collection contains duplicate items".to_string());
            }
        }
    }
    if bounds.no_empty_items {
        if let Value::List(items) | Value::Tuple(items) | Value::Set(items) = value {
            let empty_indices: Vec<String> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_truthy())
                .map(|(i, _)| i.to_string())
                .collect();
            if !empty_indices.is_empty() {
                errors.push(format!(
                    "Empty items at indices: {}",
                    empty_indices.join(", ")
                ));
            }
        }
    }
    errors
}

/// Checks a date or datetime value against [`DateTimeBounds`].
pub fn check_datetime_bounds(value: &Value, bounds: &DateTimeBounds) -> Vec<String> {
    let (moment, aware) = match value {
        Value::Date(d) => (d.and_time(NaiveTime::MIN), false),
        Value::DateTime(dt) => (*dt, false),
        Value::DateTimeTz(dt) => (dt.naive_utc(), true),
        _ => {
            return vec![format!(
                "Expected a date or datetime value, got {}",
                value.type_name()
            )]
        }
    };
    let mut errors = Vec::new();
    if bounds.require_timezone && !aware {
        errors.push("Value must carry timezone information".to_string());
    }
    if let Some(min) = bounds.min_date {
        if moment < min {
            errors.push(format!("Value {value} is before minimum {min}"));
        }
    }
    if let Some(max) = bounds.max_date {
        if moment > max {
            errors.push(format!("Value {value} is after maximum {max}"));
        }
    }
    // Aware values were normalized to UTC above, naive values are compared
    // against naive UTC now
    let now = Utc::now().naive_utc();
    if bounds.future_only && moment <= now {
        errors.push(format!("Value {value} must be in the future"));
    }
    if bounds.past_only && moment >= now {
        errors.push(format!("Value {value} must be in the past"));
    }
    errors
}
