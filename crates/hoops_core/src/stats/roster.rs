//! Regular-season-only / playoffs-only roster split.
//!
//! Players are keyed by name. Each output row carries the player id from
//! the first record with that name in source order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::season::{SeasonPhase, TaggedGame};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: u32,
    pub player_name: String,
}

/// Every player name lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterPartition {
    /// Regular season, never in the playoffs
    pub regular_only: Vec<RosterEntry>,
    /// Playoffs, never in the regular season
    pub playoffs_only: Vec<RosterEntry>,
    /// Both regular season and playoffs
    pub both: Vec<RosterEntry>,
    /// Neither: play-in games only
    pub play_in_only: Vec<RosterEntry>,
}

impl RosterPartition {
    pub fn total_players(&self) -> usize {
        self.regular_only.len() + self.playoffs_only.len() + self.both.len() + self.play_in_only.len()
    }
}

#[derive(Debug, Default)]
struct PhasePresence {
    first_player_id: u32,
    regular: bool,
    playoffs: bool,
}

/// Split players by the phases they appear in.
///
/// `games` must be in source order (as returned by [`crate::season::classify`]);
/// output rows keep first-occurrence order.
pub fn partition_rosters(games: &[TaggedGame]) -> RosterPartition {
    let mut order: Vec<&str> = Vec::new();
    let mut presence: FxHashMap<&str, PhasePresence> = FxHashMap::default();

    for game in games {
        let name = game.record.player_name.as_str();
        let entry = presence.entry(name).or_insert_with(|| {
            order.push(name);
            PhasePresence { first_player_id: game.record.player_id, ..Default::default() }
        });
        match game.phase {
            SeasonPhase::Regular => entry.regular = true,
            SeasonPhase::Playoffs => entry.playoffs = true,
            SeasonPhase::PlayIn => {}
        }
    }

    let mut partition = RosterPartition::default();
    for name in order {
        let seen = &presence[name];
        let row = RosterEntry { player_id: seen.first_player_id, player_name: name.to_string() };
        match (seen.regular, seen.playoffs) {
            (true, false) => partition.regular_only.push(row),
            (false, true) => partition.playoffs_only.push(row),
            (true, true) => partition.both.push(row),
            (false, false) => partition.play_in_only.push(row),
        }
    }

    log::info!(
        "Rosters: {} regular-season only, {} playoffs only, {} both, {} play-in only",
        partition.regular_only.len(),
        partition.playoffs_only.len(),
        partition.both.len(),
        partition.play_in_only.len()
    );

    partition
}
