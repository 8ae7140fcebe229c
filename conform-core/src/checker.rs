//! The type-checking engine.
//!
//! [`TypeChecker`] takes a runtime value, a [`TypeDescriptor`], and an
//! optional list of constraints; it determines whether the value
//! conforms, optionally coerces it, and collects human-readable error
//! messages. Composite descriptors (union, list, dict, tuple, literal)
//! are decomposed recursively, with per-element errors prefixed by their
//! index or key.

use crate::boundary::{
    check_collection_bounds, check_datetime_bounds, check_numeric_bounds, check_string_bounds,
    BoundaryReport, BoundarySpec, BoundaryValidatorFn,
};
use crate::coerce;
use crate::constraints::{
    ChoiceConstraint, Constraint, LengthConstraint, PatternConstraint, RangeConstraint,
};
use crate::descriptor::{ScalarType, TypeDescriptor};
use crate::error::{ConformError, Result};
use crate::value::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, instrument};

/// The outcome of a [`TypeChecker::check_type`] call.
///
/// `value` is the best-effort result: fully coerced on success, partially
/// coerced or the original on failure, never a masking default. The
/// invariant `valid == errors.is_empty()` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeCheckResult {
    /// True when the value conforms and every constraint passed
    pub valid: bool,
    /// The checked (possibly coerced) value
    pub value: Value,
    /// One message per failed check
    pub errors: Vec<String>,
}

impl TypeCheckResult {
    fn new(value: Value, errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            value,
            errors,
        }
    }
}

/// A reusable runtime type-checking engine.
///
/// Configuration is fixed at construction; a checker is safe to share
/// across threads once [`register_validator`](Self::register_validator)
/// setup is done.
///
/// # Examples
///
/// ```rust
/// use conform_core::checker::TypeChecker;
/// use conform_core::descriptor::TypeDescriptor;
/// use conform_core::value::Value;
///
/// # fn main() -> conform_core::error::Result<()> {
/// let checker = TypeChecker::new();
///
/// // "42" coerces to the int 42 under the default auto-convert policy
/// let result = checker.check_type(&Value::from("42"), &TypeDescriptor::INT, &[])?;
/// assert!(result.valid);
/// assert_eq!(result.value, Value::Int(42));
///
/// // Coercion disabled: the mismatch is reported instead
/// let strict = TypeChecker::new().with_auto_convert(false);
/// let result = strict.check_type(&Value::from("42"), &TypeDescriptor::INT, &[])?;
/// assert!(!result.valid);
/// # Ok(())
/// # }
/// ```
pub struct TypeChecker {
    strict_mode: bool,
    auto_convert: bool,
    raise_on_error: bool,
    validators: HashMap<String, BoundaryValidatorFn>,
}

impl fmt::Debug for TypeChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeChecker")
            .field("strict_mode", &self.strict_mode)
            .field("auto_convert", &self.auto_convert)
            .field("raise_on_error", &self.raise_on_error)
            .field("validators", &self.validators.keys())
            .finish()
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    /// Creates a checker with the default configuration: lenient scalar
    /// conformance, coercion enabled, failures reported not raised.
    pub fn new() -> Self {
        Self {
            strict_mode: false,
            auto_convert: true,
            raise_on_error: false,
            validators: HashMap::new(),
        }
    }

    /// Requires exact kind conformance: disables the lenient numeric
    /// tower under which ints satisfy float targets and bools satisfy
    /// int targets.
    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Controls whether non-conforming values are coerced by default.
    pub fn with_auto_convert(mut self, auto_convert: bool) -> Self {
        self.auto_convert = auto_convert;
        self
    }

    /// When set, type mismatches and coercion failures are returned as
    /// `Err` at the point of detection instead of being recorded.
    pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    /// Registers a custom boundary validator under the given name.
    ///
    /// Registration is a setup operation: do it before sharing the
    /// checker across threads.
    pub fn register_validator(
        &mut self,
        name: impl Into<String>,
        validator: impl Fn(&Value, &serde_json::Map<String, serde_json::Value>) -> Vec<String>
            + Send
            + Sync
            + 'static,
    ) {
        self.validators.insert(name.into(), Box::new(validator));
    }

    /// Checks a value against a type descriptor and constraints, using
    /// the checker's own conversion policy.
    pub fn check_type(
        &self,
        value: &Value,
        expected: &TypeDescriptor,
        constraints: &[&dyn Constraint],
    ) -> Result<TypeCheckResult> {
        self.check_type_with(value, expected, constraints, None)
    }

    /// Checks a value against a type descriptor and constraints, with a
    /// call-level override of the conversion policy.
    #[instrument(skip(self, value, constraints), fields(expected = %expected))]
    pub fn check_type_with(
        &self,
        value: &Value,
        expected: &TypeDescriptor,
        constraints: &[&dyn Constraint],
        convert: Option<bool>,
    ) -> Result<TypeCheckResult> {
        let should_convert = convert.unwrap_or(self.auto_convert);
        let (checked, mut errors) =
            self.dispatch(value, expected, should_convert, self.raise_on_error)?;
        self.apply_constraints(&checked, constraints, &mut errors);
        if !errors.is_empty() {
            debug!(error_count = errors.len(), "type check failed");
        }
        Ok(TypeCheckResult::new(checked, errors))
    }

    /// Runs the boundary checks described by `spec` against the value.
    #[instrument(skip(self, value, spec), fields(category = spec_category(spec)))]
    pub fn validate_boundaries(&self, value: &Value, spec: &BoundarySpec) -> BoundaryReport {
        let errors = match spec {
            BoundarySpec::Numeric(bounds) => check_numeric_bounds(value, bounds),
            BoundarySpec::String(bounds) => check_string_bounds(value, bounds),
            BoundarySpec::Collection(bounds) => check_collection_bounds(value, bounds),
            BoundarySpec::DateTime(bounds) => check_datetime_bounds(value, bounds),
            BoundarySpec::Custom { name, params } => match self.validators.get(name) {
                Some(validator) => {
                    let outcome =
                        catch_unwind(AssertUnwindSafe(|| validator(value, params)));
                    match outcome {
                        Ok(errors) => errors,
                        Err(_) => vec![ConformError::constraint_evaluation(
                            name.clone(),
                            "validator panicked",
                        )
                        .to_string()],
                    }
                }
                None => vec![format!("Unknown boundary validator '{name}'")],
            },
        };
        BoundaryReport::from_errors(errors)
    }

    fn dispatch(
        &self,
        value: &Value,
        expected: &TypeDescriptor,
        convert: bool,
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        match expected {
            TypeDescriptor::Scalar(scalar) => self.check_scalar(value, *scalar, convert, raising),
            TypeDescriptor::List(element) => {
                self.check_list(value, element.as_deref(), convert, raising)
            }
            TypeDescriptor::Map(entry) => self.check_map(value, entry.as_deref(), convert, raising),
            TypeDescriptor::Tuple(elements) => {
                self.check_tuple(value, elements.as_deref(), convert, raising)
            }
            TypeDescriptor::Union(members) => self.check_union(value, members, convert, raising),
            TypeDescriptor::Literal(allowed) => self.check_literal(value, allowed, raising),
        }
    }

    /// Scalar conformance: exact kind match, widened in non-strict mode
    /// by the source numeric tower. Datetime targets accept both naive
    /// and timezone-aware values.
    fn scalar_conforms(&self, value: &Value, scalar: ScalarType) -> bool {
        let exact = matches!(
            (value, scalar),
            (Value::Null, ScalarType::Null)
                | (Value::Bool(_), ScalarType::Bool)
                | (Value::Int(_), ScalarType::Int)
                | (Value::Float(_), ScalarType::Float)
                | (Value::Decimal(_), ScalarType::Decimal)
                | (Value::Str(_), ScalarType::Str)
                | (Value::Date(_), ScalarType::Date)
                | (Value::DateTime(_), ScalarType::DateTime)
                | (Value::DateTimeTz(_), ScalarType::DateTime)
                | (Value::Uuid(_), ScalarType::Uuid)
        );
        if exact || self.strict_mode {
            return exact;
        }
        matches!(
            (value, scalar),
            (Value::Int(_), ScalarType::Float) | (Value::Bool(_), ScalarType::Int)
        )
    }

    fn check_scalar(
        &self,
        value: &Value,
        scalar: ScalarType,
        convert: bool,
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        if self.scalar_conforms(value, scalar) {
            return Ok((value.clone(), Vec::new()));
        }
        if convert {
            match coerce::coerce(value, scalar) {
                Ok(converted) => {
                    debug!(target = scalar.name(), "value coerced");
                    Ok((converted, Vec::new()))
                }
                Err(err) => {
                    if raising {
                        return Err(err);
                    }
                    Ok((value.clone(), vec![err.to_string()]))
                }
            }
        } else {
            let err = ConformError::type_mismatch(scalar.name(), value.type_name());
            if raising {
                return Err(err);
            }
            Ok((value.clone(), vec![err.to_string()]))
        }
    }

    fn check_list(
        &self,
        value: &Value,
        element: Option<&TypeDescriptor>,
        convert: bool,
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        let items = match value {
            Value::List(items) => items.clone(),
            _ if convert => match coerce::to_list(value) {
                Ok(Value::List(items)) => items,
                Ok(_) | Err(_) => {
                    let err = ConformError::coercion(
                        "list",
                        format!("cannot convert {} to list", value.type_name()),
                    );
                    if raising {
                        return Err(err);
                    }
                    return Ok((value.clone(), vec![err.to_string()]));
                }
            },
            _ => {
                let err = ConformError::type_mismatch("list", value.type_name());
                if raising {
                    return Err(err);
                }
                return Ok((value.clone(), vec![err.to_string()]));
            }
        };
        let mut errors = Vec::new();
        let checked = match element {
            Some(element_type) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let (checked_item, item_errors) =
                        self.dispatch(item, element_type, convert, raising)?;
                    errors.extend(
                        item_errors
                            .into_iter()
                            .map(|message| format!("Index {index}: {message}")),
                    );
                    out.push(checked_item);
                }
                out
            }
            None => items,
        };
        Ok((Value::List(checked), errors))
    }

    fn check_map(
        &self,
        value: &Value,
        entry: Option<&(TypeDescriptor, TypeDescriptor)>,
        convert: bool,
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        let pairs = match value {
            Value::Map(pairs) => pairs.clone(),
            _ if convert => match coerce::to_map(value) {
                Ok(Value::Map(pairs)) => pairs,
                Ok(_) => Vec::new(),
                Err(err) => {
                    if raising {
                        return Err(err);
                    }
                    return Ok((value.clone(), vec![err.to_string()]));
                }
            },
            _ => {
                let err = ConformError::type_mismatch("dict", value.type_name());
                if raising {
                    return Err(err);
                }
                return Ok((value.clone(), vec![err.to_string()]));
            }
        };
        let mut errors = Vec::new();
        let checked = match entry {
            Some((key_type, value_type)) => {
                let mut out = Vec::with_capacity(pairs.len());
                for (key, item) in &pairs {
                    let (checked_key, key_errors) =
                        self.dispatch(key, key_type, convert, raising)?;
                    errors.extend(
                        key_errors
                            .into_iter()
                            .map(|message| format!("Key {key}: {message}")),
                    );
                    let (checked_item, item_errors) =
                        self.dispatch(item, value_type, convert, raising)?;
                    errors.extend(
                        item_errors
                            .into_iter()
                            .map(|message| format!("Key {key}: {message}")),
                    );
                    out.push((checked_key, checked_item));
                }
                out
            }
            None => pairs,
        };
        Ok((Value::Map(checked), errors))
    }

    fn check_tuple(
        &self,
        value: &Value,
        elements: Option<&[TypeDescriptor]>,
        convert: bool,
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        let items = match value {
            Value::Tuple(items) => items.clone(),
            _ if convert => match coerce::to_tuple(value) {
                Ok(Value::Tuple(items)) => items,
                _ => vec![value.clone()],
            },
            _ => {
                let err = ConformError::type_mismatch("tuple", value.type_name());
                if raising {
                    return Err(err);
                }
                return Ok((value.clone(), vec![err.to_string()]));
            }
        };
        let mut errors = Vec::new();
        let checked = match elements {
            Some(element_types) => {
                if items.len() != element_types.len() {
                    let err = ConformError::Structural(format!(
                        "expected tuple of length {}, got {}",
                        element_types.len(),
                        items.len()
                    ));
                    if raising {
                        return Err(err);
                    }
                    return Ok((Value::Tuple(items), vec![err.to_string()]));
                }
                let mut out = Vec::with_capacity(items.len());
                for (index, (item, element_type)) in
                    items.iter().zip(element_types.iter()).enumerate()
                {
                    let (checked_item, item_errors) =
                        self.dispatch(item, element_type, convert, raising)?;
                    errors.extend(
                        item_errors
                            .into_iter()
                            .map(|message| format!("Index {index}: {message}")),
                    );
                    out.push(checked_item);
                }
                out
            }
            None => items,
        };
        Ok((Value::Tuple(checked), errors))
    }

    /// Union resolution is two-pass: the first structural match (no
    /// coercion) wins, and only when no member matches structurally are
    /// members retried in declaration order with coercion. This keeps a
    /// permissive early member, like `str`, from masking a later exact
    /// match.
    fn check_union(
        &self,
        value: &Value,
        members: &[TypeDescriptor],
        convert: bool,
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        let mut errors = Vec::new();
        for member in members {
            let (checked, member_errors) = self.dispatch(value, member, false, false)?;
            if member_errors.is_empty() {
                return Ok((checked, Vec::new()));
            }
            if !convert {
                errors.extend(member_errors);
            }
        }
        if convert {
            for member in members {
                let (checked, member_errors) = self.dispatch(value, member, true, false)?;
                if member_errors.is_empty() {
                    return Ok((checked, Vec::new()));
                }
                errors.extend(member_errors);
            }
        }
        let union_name = TypeDescriptor::Union(members.to_vec()).to_string();
        errors.push(format!(
            "Value of type {} does not match any member of union {}",
            value.type_name(),
            union_name
        ));
        if raising {
            return Err(ConformError::type_mismatch(union_name, value.type_name()));
        }
        Ok((value.clone(), errors))
    }

    fn check_literal(
        &self,
        value: &Value,
        allowed: &[Value],
        raising: bool,
    ) -> Result<(Value, Vec<String>)> {
        if allowed.iter().any(|candidate| candidate == value) {
            return Ok((value.clone(), Vec::new()));
        }
        let literal_name = TypeDescriptor::Literal(allowed.to_vec()).to_string();
        if raising {
            return Err(ConformError::type_mismatch(
                literal_name,
                value.type_name(),
            ));
        }
        Ok((
            value.clone(),
            vec![format!(
                "Value {value} is not an allowed literal value: {literal_name}"
            )],
        ))
    }

    /// Evaluates every constraint, collecting every failure. Constraints
    /// are untrusted caller plugins: a panicking constraint is reported
    /// as an error string, never propagated.
    fn apply_constraints(
        &self,
        value: &Value,
        constraints: &[&dyn Constraint],
        errors: &mut Vec<String>,
    ) {
        for constraint in constraints {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                if constraint.validate(value) {
                    None
                } else {
                    Some(constraint.message(value))
                }
            }));
            match outcome {
                Ok(None) => {}
                Ok(Some(message)) => errors.push(message),
                Err(_) => errors.push(
                    ConformError::constraint_evaluation(constraint.name(), "evaluation panicked")
                        .to_string(),
                ),
            }
        }
    }
}

fn spec_category(spec: &BoundarySpec) -> &str {
    match spec {
        BoundarySpec::Numeric(_) => "numeric",
        BoundarySpec::String(_) => "string",
        BoundarySpec::Collection(_) => "collection",
        BoundarySpec::DateTime(_) => "datetime",
        BoundarySpec::Custom { name, .. } => name,
    }
}

/// Checks a numeric value against an optional range.
///
/// One-shot wrapper over a default checker and a single
/// [`RangeConstraint`]; the value is checked against its own runtime
/// kind, so only the constraint is exercised.
pub fn check_numeric_range(
    value: &Value,
    min_value: Option<f64>,
    max_value: Option<f64>,
) -> BoundaryReport {
    one_shot(value, &RangeConstraint::new(min_value, max_value))
}

/// Checks a value's length against optional bounds.
pub fn check_string_length(
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> BoundaryReport {
    one_shot(value, &LengthConstraint::new(min_length, max_length))
}

/// Checks a string value against a regex pattern source.
pub fn check_pattern_match(value: &Value, pattern: &str) -> BoundaryReport {
    match Regex::new(pattern) {
        Ok(compiled) => one_shot(value, &PatternConstraint::new(compiled)),
        Err(err) => BoundaryReport::fail(format!("Invalid pattern '{pattern}': {err}")),
    }
}

/// Checks membership of a value in an allowed set of choices.
pub fn check_choices(value: &Value, choices: &[Value]) -> BoundaryReport {
    one_shot(value, &ChoiceConstraint::new(choices.to_vec()))
}

fn one_shot(value: &Value, constraint: &dyn Constraint) -> BoundaryReport {
    let checker = TypeChecker::new();
    match checker.check_type(value, &TypeDescriptor::for_value(value), &[constraint]) {
        Ok(result) => BoundaryReport::from_errors(result.errors),
        Err(err) => BoundaryReport::fail(err.to_string()),
    }
}
