//! Error types for the Conform validation library.
//!
//! This module provides a comprehensive error handling strategy using `thiserror`
//! for automatic error trait implementations. All errors in the Conform library
//! are represented by the `ConformError` enum.

use thiserror::Error;

/// The main error type for the Conform library.
///
/// By default the engine reports validation failures as error strings inside
/// its result types; `ConformError` values only cross the public API when a
/// checker is configured with `raise_on_error`.
#[derive(Error, Debug)]
pub enum ConformError {
    /// Error when a value's runtime type does not satisfy the expected type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Error when a conversion to a target type was attempted and failed.
    #[error("Conversion to {target} failed: {message}")]
    Coercion {
        /// Name of the target type
        target: String,
        /// Detailed error message
        message: String,
    },

    /// Error when a composite value's shape does not match the descriptor.
    #[error("Structural mismatch: {0}")]
    Structural(String),

    /// Error when a constraint evaluation fails unexpectedly.
    #[error("Constraint evaluation failed for '{constraint}': {message}")]
    ConstraintEvaluation {
        /// Name of the constraint that failed
        constraint: String,
        /// Detailed error message
        message: String,
    },

    /// Error when parsing or processing data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ConformError>`.
///
/// This is the standard `Result` type used throughout the Conform library.
pub type Result<T> = std::result::Result<T, ConformError>;

impl ConformError {
    /// Creates a new type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a new coercion error for the given target type.
    pub fn coercion(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Coercion {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates a new constraint evaluation error.
    pub fn constraint_evaluation(
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConstraintEvaluation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}
