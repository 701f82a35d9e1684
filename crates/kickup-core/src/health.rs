//! Daily wellbeing check.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fatigue at or above this level switches the plan to rest.
pub const SMART_REST_FATIGUE: u8 = 8;

const SCALE_MIN: u8 = 1;
const SCALE_MAX: u8 = 10;

/// Self-reported mood and fatigue, each on a 1..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub mood: u8,
    pub fatigue: u8,
}

impl HealthCheck {
    pub fn new(mood: u8, fatigue: u8) -> Result<Self, ValidationError> {
        let check = Self { mood, fatigue };
        check.validate()?;
        Ok(check)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("mood", self.mood), ("fatigue", self.fatigue)] {
            if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field: field.into(),
                    value: value.into(),
                    min: SCALE_MIN.into(),
                    max: SCALE_MAX.into(),
                });
            }
        }
        Ok(())
    }

    pub fn needs_rest(&self) -> bool {
        self.fatigue >= SMART_REST_FATIGUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_bounds() {
        assert!(HealthCheck::new(1, 10).is_ok());
        assert!(HealthCheck::new(0, 5).is_err());
        assert!(HealthCheck::new(5, 11).is_err());
    }

    #[test]
    fn rest_threshold() {
        assert!(!HealthCheck::new(5, 7).unwrap().needs_rest());
        assert!(HealthCheck::new(5, 8).unwrap().needs_rest());
    }
}
