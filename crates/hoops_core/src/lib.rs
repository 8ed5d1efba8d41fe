//! # hoops_core - Season Box-Score Analytics
//!
//! Turns a season of per-player game logs into the tables behind the
//! season report:
//! - season phase / all-star side tagging from fixed calendar cutoffs
//! - last-N-games per-28-minute aggregates
//! - regular-season-only / playoffs-only rosters
//! - the after-break scoring dataset and its logistic significance report
//! - team points distributions (bin counts + PNG)
//!
//! Everything is deterministic: the only randomness is the row shuffle
//! before the model fit, driven by an explicit seed.

// Stat structs are plain data with many numeric fields
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod plot;
pub mod season;
pub mod stats;

pub use analysis::{
    build_all_star_dataset, report_significant_predictors, AllStarDataset, AllStarRow,
    Coefficient, LogisticFit, LogisticRegression, SignificanceReport, SignificantPredictor,
    FEATURE_NAMES,
};
pub use config::{
    AllStarConfig, AnalysisConfig, FeatureWindow, Per28Config, PlotConfig, SeasonCalendar,
    SignificanceConfig, EASTERN_CONFERENCE,
};
pub use error::{AnalysisError, ConfigError, FitError, Result, Stage};
pub use models::{BoxScore, GameLogRecord};
pub use plot::{build_points_distribution, render_points_distribution, PointsDistribution, TeamHistogram};
pub use season::{classify, parse_game_date, AllStarSide, SeasonPhase, TaggedGame};
pub use stats::{partition_rosters, per28_last_games, Per28Line, RosterEntry, RosterPartition};
