//! # Analysis Configuration
//!
//! Every threshold and cutoff the report uses, grouped by stage.
//! Defaults reproduce the 2021-22 season report; a YAML file may
//! override any subset of fields.
//!
//! ```rust
//! use hoops_core::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.per28.window, 5);
//! ```

mod aggregation_config;
mod all_star_config;
mod plot_config;
mod season_config;

pub use aggregation_config::Per28Config;
pub use all_star_config::{AllStarConfig, FeatureWindow, SignificanceConfig};
pub use plot_config::{PlotConfig, EASTERN_CONFERENCE};
pub use season_config::SeasonCalendar;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Full report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Phase and all-star cutoffs
    pub calendar: SeasonCalendar,
    /// Last-N-games per-28 aggregation
    pub per28: Per28Config,
    /// All-star dataset selection and labelling
    pub all_star: AllStarConfig,
    /// Logistic fit and significance threshold
    pub significance: SignificanceConfig,
    /// Points distribution filter and layout
    pub plot: PlotConfig,
}

impl AnalysisConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_yaml_str(&yaml)?;
        log::info!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar.validate()?;
        self.per28.validate()?;
        self.all_star.validate()?;
        self.significance.validate()?;
        self.plot.validate()?;
        Ok(())
    }
}

/// Literal dates in defaults and tests
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("hard-coded calendar date is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
per28:
  window: 10
significance:
  seed: 7
all_star:
  feature_window: after_break
"#;
        let config = AnalysisConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.per28.window, 10);
        assert_eq!(config.per28.minutes_basis, 28.0);
        assert_eq!(config.significance.seed, 7);
        assert_eq!(config.significance.alpha, 0.05);
        assert_eq!(config.all_star.feature_window, FeatureWindow::AfterBreak);
        assert_eq!(config.calendar, SeasonCalendar::default());
    }

    #[test]
    fn test_calendar_dates_parse_from_yaml() {
        let yaml = r#"
calendar:
  play_in_start: 2023-04-11
  playoffs_start: 2023-04-15
  all_star_break: 2023-02-17
"#;
        let config = AnalysisConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.calendar.play_in_start, ymd(2023, 4, 11));
        assert_eq!(config.calendar.all_star_break, ymd(2023, 2, 17));
    }

    #[test]
    fn test_invalid_yaml_values_rejected() {
        let yaml = "per28:\n  window: 0\n";
        assert!(matches!(
            AnalysisConfig::from_yaml_str(yaml),
            Err(ConfigError::InvalidParameter { name: "per28.window", .. })
        ));

        let yaml = "calendar:\n  play_in_start: 2022-04-20\n";
        assert!(matches!(
            AnalysisConfig::from_yaml_str(yaml),
            Err(ConfigError::InvalidCalendar(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalysisConfig::load(Path::new("/nonexistent/season.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "plot:\n  bins: 30").unwrap();
        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.plot.bins, 30);
    }
}
