//! Error types for the medsift crate.
//!
//! Only configuration problems surface as errors. A record whose data does
//! not fit a clause is never an error: the clause simply does not match.

use thiserror::Error;

use crate::registry::FieldKind;
use crate::rule::Rule;

/// Errors that can occur when compiling filter configurations.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Clause references a field absent from the registry.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// Rule is not legal for the kind of the field.
    #[error("rule '{rule}' is not valid for {kind} field '{field}'")]
    RuleNotAllowed {
        field: String,
        rule: Rule,
        kind: FieldKind,
    },

    /// Clause has no rule and the field kind has no default.
    #[error("{kind} field '{field}' requires a rule")]
    MissingRule { field: String, kind: FieldKind },

    /// Filter value cannot be read as the kind of the field.
    #[error("field '{field}' expects a {expected} value, got {actual}")]
    ValueKind {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Label is not one of the two canonical labels of the field.
    #[error("'{label}' is not a label of field '{field}' (expected '{primary}' or '{secondary}')")]
    UnknownLabel {
        field: String,
        label: String,
        primary: &'static str,
        secondary: &'static str,
    },

    /// Rule name not recognised.
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// Date display format is not a valid chrono format string.
    #[error("invalid date display format '{0}'")]
    DateFormat(String),

    /// Malformed configuration document.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for medsift operations.
pub type Result<T> = std::result::Result<T, FilterError>;
