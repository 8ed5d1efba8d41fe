use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-28 aggregation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Per28Config {
    /// Most recent regular-season games per player (기본: 5)
    pub window: usize,
    /// Fixed minutes basis the summed stats are divided by (기본: 28.0)
    pub minutes_basis: f64,
}

impl Default for Per28Config {
    fn default() -> Self {
        Self { window: 5, minutes_basis: 28.0 }
    }
}

impl Per28Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "per28.window",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.minutes_basis.is_finite() && self.minutes_basis > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "per28.minutes_basis",
                reason: format!("must be positive, got {}", self.minutes_basis),
            });
        }
        Ok(())
    }
}
