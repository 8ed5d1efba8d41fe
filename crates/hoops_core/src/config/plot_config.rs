use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ymd;
use crate::error::ConfigError;

/// Eastern conference team codes, 2021-22
pub const EASTERN_CONFERENCE: [&str; 15] = [
    "ATL", "BKN", "BOS", "CHA", "CHI", "CLE", "DET", "IND", "MIA", "MIL", "NYK", "ORL", "PHI",
    "TOR", "WAS",
];

/// Points distribution filter and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Team codes kept for the plot
    pub teams: Vec<String>,
    /// First date kept, inclusive (기본: 2021-12-01)
    pub start: NaiveDate,
    /// Last date kept, inclusive (기본: 2021-12-31)
    pub end: NaiveDate,
    /// Histogram bins per panel (기본: 10)
    pub bins: usize,
    /// Panels per grid row (기본: 5)
    pub columns: usize,
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            teams: EASTERN_CONFERENCE.iter().map(|t| t.to_string()).collect(),
            start: ymd(2021, 12, 1),
            end: ymd(2021, 12, 31),
            bins: 10,
            columns: 5,
            width: 2000,
            height: 1000,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start > self.end {
            return Err(ConfigError::InvalidParameter {
                name: "plot.start",
                reason: format!("{} is after plot.end {}", self.start, self.end),
            });
        }
        if self.bins == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "plot.bins",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.columns == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "plot.columns",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.width < 100 || self.height < 100 {
            return Err(ConfigError::InvalidParameter {
                name: "plot.width",
                reason: format!("image {}x{} is too small", self.width, self.height),
            });
        }
        Ok(())
    }

    pub fn includes(&self, team: &str, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end && self.teams.iter().any(|t| t == team)
    }
}
