//! All-star dataset and significance configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which of a selected player's games the feature means are taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureWindow {
    /// Every game the player logged, including play-in and playoffs
    #[default]
    AllGames,
    BeforeBreak,
    AfterBreak,
}

impl FeatureWindow {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureWindow::AllGames => "all_games",
            FeatureWindow::BeforeBreak => "before_break",
            FeatureWindow::AfterBreak => "after_break",
        }
    }

    /// Parse from string (case-insensitive, `-` or `_`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "all_games" | "all" => Some(FeatureWindow::AllGames),
            "before_break" | "before" => Some(FeatureWindow::BeforeBreak),
            "after_break" | "after" => Some(FeatureWindow::AfterBreak),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllStarConfig {
    /// Games required on each side, strictly more than (기본: 15)
    pub min_games: u32,
    /// Minutes per game required on each side, strictly more than (기본: 15.0)
    pub min_minutes_per_game: f64,
    /// After-break points per game for label 1, strictly more than (기본: 15.0)
    pub scoring_threshold: f64,
    pub feature_window: FeatureWindow,
}

impl Default for AllStarConfig {
    fn default() -> Self {
        Self {
            min_games: 15,
            min_minutes_per_game: 15.0,
            scoring_threshold: 15.0,
            feature_window: FeatureWindow::AllGames,
        }
    }
}

impl AllStarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_minutes_per_game.is_finite() || self.min_minutes_per_game < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "all_star.min_minutes_per_game",
                reason: format!("must be a non-negative number, got {}", self.min_minutes_per_game),
            });
        }
        if !self.scoring_threshold.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "all_star.scoring_threshold",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Logistic fit parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceConfig {
    /// Seed for the pre-fit row shuffle (기본: 49)
    pub seed: u64,
    /// Two-sided p-value cutoff (기본: 0.05)
    pub alpha: f64,
    /// Newton iterations before giving up (기본: 35)
    pub max_iterations: usize,
    /// Max absolute parameter step treated as converged (기본: 1e-8)
    pub tolerance: f64,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self { seed: 49, alpha: 0.05, max_iterations: 35, tolerance: 1e-8 }
    }
}

impl SignificanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "significance.alpha",
                reason: format!("must be in (0, 1), got {}", self.alpha),
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "significance.max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "significance.tolerance",
                reason: format!("must be positive, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_window_parse() {
        assert_eq!(FeatureWindow::parse("all-games"), Some(FeatureWindow::AllGames));
        assert_eq!(FeatureWindow::parse("BEFORE_BREAK"), Some(FeatureWindow::BeforeBreak));
        assert_eq!(FeatureWindow::parse("after"), Some(FeatureWindow::AfterBreak));
        assert_eq!(FeatureWindow::parse("playoffs"), None);
    }

    #[test]
    fn test_feature_window_names_round_trip() {
        for window in [FeatureWindow::AllGames, FeatureWindow::BeforeBreak, FeatureWindow::AfterBreak] {
            assert_eq!(FeatureWindow::parse(window.name()), Some(window));
        }
    }

    #[test]
    fn test_alpha_bounds() {
        let config = SignificanceConfig { alpha: 1.0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
