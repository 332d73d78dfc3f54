//! Camper field validation
//!
//! Campers carry a non-empty name and an age between 8 and 18.

use super::ValidationError;

/// Inclusive age bounds for campers.
pub const MIN_CAMPER_AGE: i64 = 8;
pub const MAX_CAMPER_AGE: i64 = 18;

/// Validated camper name (non-empty text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamperName(String);

impl CamperName {
    /// Create a camper name, rejecting empty text.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CamperName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated camper age (8..=18)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CamperAge(i64);

impl CamperAge {
    /// Create a camper age, rejecting values outside 8..=18.
    ///
    /// # Example
    /// ```
    /// use campline_server::models::CamperAge;
    ///
    /// assert!(CamperAge::new(12).is_ok());
    /// assert!(CamperAge::new(7).is_err());
    /// assert!(CamperAge::new(19).is_err());
    /// ```
    pub fn new(age: i64) -> Result<Self, ValidationError> {
        if !(MIN_CAMPER_AGE..=MAX_CAMPER_AGE).contains(&age) {
            return Err(ValidationError::OutOfRange {
                field: "age",
                min: MIN_CAMPER_AGE,
                max: MAX_CAMPER_AGE,
            });
        }
        Ok(Self(age))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Partial update for a camper.
///
/// Only these two fields are updatable; anything else in a PATCH body
/// is rejected before it reaches the database.
#[derive(Debug, Clone, Default)]
pub struct CamperPatch {
    pub name: Option<CamperName>,
    pub age: Option<CamperAge>,
}

impl CamperPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}
