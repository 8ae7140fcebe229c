//! Prelude for commonly used types and traits in conform-core.

pub use crate::boundary::{
    BoundaryReport, BoundarySpec, CollectionBounds, DateTimeBounds, NumericBounds, StringBounds,
};
pub use crate::checker::{
    check_choices, check_numeric_range, check_pattern_match, check_string_length, TypeCheckResult,
    TypeChecker,
};
pub use crate::constraints::{
    ChoiceConstraint, Constraint, LengthConstraint, PatternConstraint, RangeConstraint,
};
pub use crate::descriptor::{ScalarType, TypeDescriptor};
pub use crate::error::{ConformError, Result};
pub use crate::value::{Value, ValueKind};
