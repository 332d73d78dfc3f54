//! Signup field validation

use super::ValidationError;

/// Inclusive hour-of-day bounds for signup times.
pub const MIN_SIGNUP_TIME: i64 = 0;
pub const MAX_SIGNUP_TIME: i64 = 23;

/// Validated signup time (hour of day, 0..=23)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupTime(i64);

impl SignupTime {
    /// Create a signup time, rejecting hours outside 0..=23.
    pub fn new(time: i64) -> Result<Self, ValidationError> {
        if !(MIN_SIGNUP_TIME..=MAX_SIGNUP_TIME).contains(&time) {
            return Err(ValidationError::OutOfRange {
                field: "time",
                min: MIN_SIGNUP_TIME,
                max: MAX_SIGNUP_TIME,
            });
        }
        Ok(Self(time))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}
