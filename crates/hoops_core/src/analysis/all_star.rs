//! All-star predictor dataset.
//!
//! Selection: more than `min_games` games and more than
//! `min_minutes_per_game` minutes per game on *both* sides of the break.
//! Label: after-break points per game above `scoring_threshold`.
//! Features: per-game means over the configured [`FeatureWindow`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{AllStarConfig, FeatureWindow};
use crate::error::{AnalysisError, Result, Stage};
use crate::season::{AllStarSide, TaggedGame};

/// Feature columns, in model order
pub const FEATURE_NAMES: [&str; 6] = ["FG_PCT", "FG3A", "FTA", "AST", "TOV", "OREB"];

const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Games, minutes and points on one side of the break
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub games: u32,
    pub minutes: f64,
    pub points: f64,
}

impl SideSummary {
    pub fn minutes_per_game(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.minutes / self.games as f64
        }
    }

    pub fn points_per_game(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.points / self.games as f64
        }
    }

    pub fn qualifies(&self, config: &AllStarConfig) -> bool {
        self.games > config.min_games && self.minutes_per_game() > config.min_minutes_per_game
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllStarRow {
    pub player_name: String,
    /// Means of [`FEATURE_NAMES`], same order
    pub features: [f64; FEATURE_COUNT],
    /// 1 when after-break scoring beat the threshold
    pub label: u8,
    pub before: SideSummary,
    pub after: SideSummary,
}

impl AllStarRow {
    pub fn feature(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES.iter().position(|f| *f == name).map(|idx| self.features[idx])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllStarDataset {
    /// Sorted by player name
    pub rows: Vec<AllStarRow>,
    pub feature_window: FeatureWindow,
}

impl AllStarDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.rows.iter().filter(|r| r.label == 1).count()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FeatureSums {
    games: u32,
    sums: [f64; FEATURE_COUNT],
}

impl FeatureSums {
    fn add_game(&mut self, game: &TaggedGame) {
        let r = &game.record;
        let values = [
            r.field_goal_pct(),
            r.box_score.fg3a,
            r.box_score.fta,
            r.box_score.ast,
            r.box_score.tov,
            r.box_score.oreb,
        ];
        for (sum, value) in self.sums.iter_mut().zip(values) {
            *sum += value;
        }
        self.games += 1;
    }

    fn merged(&self, other: &FeatureSums) -> FeatureSums {
        let mut out = *self;
        out.games += other.games;
        for (sum, value) in out.sums.iter_mut().zip(other.sums) {
            *sum += value;
        }
        out
    }

    fn means(&self) -> [f64; FEATURE_COUNT] {
        let n = self.games.max(1) as f64;
        self.sums.map(|s| s / n)
    }
}

#[derive(Debug, Default)]
struct PlayerSplit {
    before: SideSummary,
    after: SideSummary,
    before_features: FeatureSums,
    after_features: FeatureSums,
}

pub fn build_all_star_dataset(games: &[TaggedGame], config: &AllStarConfig) -> Result<AllStarDataset> {
    let mut splits: BTreeMap<&str, PlayerSplit> = BTreeMap::new();
    for game in games {
        let split = splits.entry(game.record.player_name.as_str()).or_default();
        let (side, features) = match game.all_star_side {
            AllStarSide::Before => (&mut split.before, &mut split.before_features),
            AllStarSide::After => (&mut split.after, &mut split.after_features),
        };
        side.games += 1;
        side.minutes += game.record.minutes;
        side.points += game.record.points();
        features.add_game(game);
    }

    let rows: Vec<AllStarRow> = splits
        .into_iter()
        .filter(|(_, s)| s.before.qualifies(config) && s.after.qualifies(config))
        .map(|(name, s)| {
            let window = match config.feature_window {
                FeatureWindow::AllGames => s.before_features.merged(&s.after_features),
                FeatureWindow::BeforeBreak => s.before_features,
                FeatureWindow::AfterBreak => s.after_features,
            };
            let label = u8::from(s.after.points_per_game() > config.scoring_threshold);
            log::debug!(
                "{}: {} games before / {} after, {:.1} ppg after -> label {}",
                name,
                s.before.games,
                s.after.games,
                s.after.points_per_game(),
                label
            );
            AllStarRow {
                player_name: name.to_string(),
                features: window.means(),
                label,
                before: s.before,
                after: s.after,
            }
        })
        .collect();

    if rows.is_empty() {
        return Err(AnalysisError::empty(
            Stage::AllStarDataset,
            format!(
                "no player has more than {} games at more than {} min/game on both sides of the break",
                config.min_games, config.min_minutes_per_game
            ),
        ));
    }

    let dataset = AllStarDataset { rows, feature_window: config.feature_window };
    log::info!(
        "All-star dataset: {} players ({} above {} ppg after the break), features over {}",
        dataset.len(),
        dataset.positives(),
        config.scoring_threshold,
        config.feature_window.name()
    );
    Ok(dataset)
}
