//! Session configuration, passed from JS as an optional JSON string

use serde::{Deserialize, Serialize};

use crate::error::FormError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Used for the calorie estimate
    pub body_weight_kg: f64,
    /// Frames kept in the performance history
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            body_weight_kg: 70.0,
            history_capacity: 300,
        }
    }
}

impl SessionConfig {
    /// Parse and validate; an empty string yields the defaults
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if !(self.body_weight_kg.is_finite() && self.body_weight_kg > 0.0) {
            return Err(FormError::ConfigValue(format!(
                "bodyWeightKg must be positive, got {}",
                self.body_weight_kg
            )));
        }
        if self.history_capacity == 0 {
            return Err(FormError::ConfigValue("historyCapacity must be at least 1".into()));
        }
        Ok(())
    }
}
