//! Season calendar cutoffs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ymd;
use crate::error::ConfigError;

/// Date cutoffs for phase and all-star tagging.
///
/// Every range is closed on the later side: a game played on a cutoff
/// date belongs to the later phase / side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonCalendar {
    /// First play-in date (기본: 2022-04-11)
    pub play_in_start: NaiveDate,
    /// First playoff date (기본: 2022-04-15)
    pub playoffs_start: NaiveDate,
    /// First date counted as after the all-star break (기본: 2022-02-18)
    pub all_star_break: NaiveDate,
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self::season_2021_22()
    }
}

impl SeasonCalendar {
    pub fn season_2021_22() -> Self {
        Self {
            play_in_start: ymd(2022, 4, 11),
            playoffs_start: ymd(2022, 4, 15),
            all_star_break: ymd(2022, 2, 18),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.play_in_start >= self.playoffs_start {
            return Err(ConfigError::InvalidCalendar(format!(
                "play-in start {} must be before playoffs start {}",
                self.play_in_start, self.playoffs_start
            )));
        }
        if self.all_star_break >= self.play_in_start {
            return Err(ConfigError::InvalidCalendar(format!(
                "all-star break {} must fall inside the regular season (before {})",
                self.all_star_break, self.play_in_start
            )));
        }
        Ok(())
    }
}
