//! Team points distributions for a fixed roster and date window.
//!
//! All panels share one set of bin edges, taken from the min/max points
//! over the filtered games, so panels are directly comparable.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::PlotConfig;
use crate::error::{AnalysisError, Result, Stage};
use crate::season::TaggedGame;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHistogram {
    pub team: String,
    /// One count per bin
    pub counts: Vec<u32>,
    /// Player-games in the panel
    pub games: usize,
    /// Distinct players in the panel
    pub players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsDistribution {
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    /// Sorted by team code
    pub panels: Vec<TeamHistogram>,
}

impl PointsDistribution {
    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn max_count(&self) -> u32 {
        self.panels
            .iter()
            .flat_map(|p| p.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Bin index for `value` with `bins` equal-width bins starting at `min`.
/// The top edge is inclusive; a zero-width range maps everything to bin 0.
fn bin_index(value: f64, min: f64, width: f64, bins: usize) -> usize {
    if width <= 0.0 {
        return 0;
    }
    let idx = ((value - min) / width).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(bins - 1)
    }
}

pub fn build_points_distribution(games: &[TaggedGame], config: &PlotConfig) -> Result<PointsDistribution> {
    let mut by_team: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::new();
    for game in games {
        let r = &game.record;
        if config.includes(&r.team, r.game_date) {
            by_team.entry(r.team.as_str()).or_default().push((r.player_name.as_str(), r.points()));
        }
    }

    if by_team.is_empty() {
        return Err(AnalysisError::empty(
            Stage::Distribution,
            format!("no games for the plotted teams between {} and {}", config.start, config.end),
        ));
    }
    let (min, max) = by_team
        .values()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, p)| (lo.min(*p), hi.max(*p)));

    let bins = config.bins;
    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + width * i as f64 })
        .collect();

    let panels: Vec<TeamHistogram> = by_team
        .into_iter()
        .map(|(team, rows)| {
            let mut counts = vec![0u32; bins];
            for (_, pts) in &rows {
                counts[bin_index(*pts, min, width, bins)] += 1;
            }
            let players: BTreeSet<&str> = rows.iter().map(|(name, _)| *name).collect();
            TeamHistogram { team: team.to_string(), counts, games: rows.len(), players: players.len() }
        })
        .collect();

    log::info!(
        "Points distribution: {} teams, {} player-games, {} bins over [{}, {}]",
        panels.len(),
        panels.iter().map(|p| p.games).sum::<usize>(),
        bins,
        min,
        max
    );

    Ok(PointsDistribution { edges, panels })
}
