//! Validation error types

use std::fmt;

/// Validation error for domain models.
///
/// Distinct from not-found and database failures: a validation error
/// always maps to a 400 response at the handler boundary.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Integer field falls outside its allowed range
    OutOfRange { field: &'static str, min: i64, max: i64 },

    /// Field name not in the allow-list for a partial update
    UnknownField { field: String },

    /// Field has the wrong JSON type
    InvalidType { field: &'static str, expected: &'static str },

    /// Foreign key does not reference an existing row
    MissingReference { field: &'static str, id: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::UnknownField { field } => write!(f, "unknown field '{}'", field),
            Self::InvalidType { field, expected } => {
                write!(f, "{} must be {}", field, expected)
            }
            Self::MissingReference { field, id } => {
                write!(f, "{} {} does not reference an existing row", field, id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
