//! Last-N-games per-28-minute aggregates.
//!
//! One grouped pass over the regular-season games: group by player,
//! order each group by (date, source order), keep the most recent
//! `window` games, sum, then divide by the fixed minutes basis. Shooting
//! percentages come from the summed makes and attempts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Per28Config;
use crate::error::{AnalysisError, Result, Stage};
use crate::models::BoxScore;
use crate::season::{SeasonPhase, TaggedGame};

/// One player's per-28 line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Per28Line {
    pub player_id: u32,
    /// Games that went into the window (≤ configured window)
    pub games_used: usize,
    /// Summed counting stats divided by the minutes basis
    pub per28: BoxScore,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
}

pub fn per28_last_games(games: &[TaggedGame], config: &Per28Config) -> Result<Vec<Per28Line>> {
    let mut by_player: BTreeMap<u32, Vec<&TaggedGame>> = BTreeMap::new();
    for game in games.iter().filter(|g| g.phase == SeasonPhase::Regular) {
        by_player.entry(game.record.player_id).or_default().push(game);
    }

    if by_player.is_empty() {
        return Err(AnalysisError::empty(Stage::Per28, "no regular-season games"));
    }

    let mut short_windows = 0usize;
    let lines: Vec<Per28Line> = by_player
        .into_iter()
        .map(|(player_id, mut player_games)| {
            player_games.sort_by_key(|g| (g.record.game_date, g.source_index));
            let start = player_games.len().saturating_sub(config.window);
            let recent = &player_games[start..];
            if recent.len() < config.window {
                short_windows += 1;
                log::debug!(
                    "Player {} has only {} regular-season games (window {})",
                    player_id,
                    recent.len(),
                    config.window
                );
            }

            let mut totals = BoxScore::default();
            for game in recent {
                totals.accumulate(&game.record.box_score);
            }

            Per28Line {
                player_id,
                games_used: recent.len(),
                per28: totals.scaled(config.minutes_basis),
                fg_pct: totals.field_goal_pct(),
                fg3_pct: totals.three_point_pct(),
                ft_pct: totals.free_throw_pct(),
            }
        })
        .collect();

    if short_windows > 0 {
        log::warn!(
            "{} of {} players have fewer than {} regular-season games; using all they have",
            short_windows,
            lines.len(),
            config.window
        );
    }
    log::info!("Per-{} lines built for {} players", config.minutes_basis, lines.len());

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ymd, SeasonCalendar};
    use crate::models::GameLogRecord;
    use crate::season::classify;
    use chrono::NaiveDate;

    fn game(player_id: u32, date: NaiveDate, fgm: f64, fga: f64, pts: f64) -> GameLogRecord {
        let box_score = BoxScore { fgm, fga, pts, ..Default::default() };
        GameLogRecord::new(player_id, format!("Player {}", player_id), "BOS", date, 30.0, box_score)
    }

    #[test]
    fn test_window_keeps_most_recent_games() {
        // dates deliberately out of order; last five by date are days 3..=7
        let records = vec![
            game(1, ymd(2022, 1, 7), 1.0, 2.0, 7.0),
            game(1, ymd(2022, 1, 1), 1.0, 2.0, 1.0),
            game(1, ymd(2022, 1, 5), 1.0, 2.0, 5.0),
            game(1, ymd(2022, 1, 3), 1.0, 2.0, 3.0),
            game(1, ymd(2022, 1, 2), 1.0, 2.0, 2.0),
            game(1, ymd(2022, 1, 6), 1.0, 2.0, 6.0),
            game(1, ymd(2022, 1, 4), 1.0, 2.0, 4.0),
        ];
        let games = classify(records, &SeasonCalendar::default());
        let lines = per28_last_games(&games, &Per28Config::default()).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].games_used, 5);
        assert_eq!(lines[0].per28.pts, (3.0 + 4.0 + 5.0 + 6.0 + 7.0) / 28.0);
        assert_eq!(lines[0].per28.fga, 10.0 / 28.0);
        assert_eq!(lines[0].fg_pct, 0.5);
    }

    #[test]
    fn test_same_day_ties_use_source_order() {
        let day = ymd(2022, 3, 1);
        let records = vec![
            game(9, day, 0.0, 0.0, 10.0),
            game(9, day, 0.0, 0.0, 20.0),
            game(9, day, 0.0, 0.0, 30.0),
        ];
        let games = classify(records, &SeasonCalendar::default());
        let config = Per28Config { window: 2, ..Default::default() };
        let lines = per28_last_games(&games, &config).unwrap();
        assert_eq!(lines[0].per28.pts, 50.0 / 28.0);
    }

    #[test]
    fn test_playoff_and_play_in_games_ignored() {
        let records = vec![
            game(3, ymd(2022, 4, 1), 2.0, 4.0, 4.0),
            game(3, ymd(2022, 4, 12), 9.0, 9.0, 18.0),
            game(3, ymd(2022, 4, 20), 9.0, 9.0, 18.0),
        ];
        let games = classify(records, &SeasonCalendar::default());
        let lines = per28_last_games(&games, &Per28Config::default()).unwrap();
        assert_eq!(lines[0].games_used, 1);
        assert_eq!(lines[0].per28.pts, 4.0 / 28.0);
        assert_eq!(lines[0].fg_pct, 0.5);
    }

    #[test]
    fn test_zero_attempts_give_zero_pct() {
        let records = vec![game(4, ymd(2022, 1, 10), 0.0, 0.0, 0.0)];
        let games = classify(records, &SeasonCalendar::default());
        let lines = per28_last_games(&games, &Per28Config::default()).unwrap();
        assert_eq!(lines[0].fg_pct, 0.0);
        assert_eq!(lines[0].fg3_pct, 0.0);
        assert_eq!(lines[0].ft_pct, 0.0);
    }

    #[test]
    fn test_sorted_by_player_id() {
        let records = vec![
            game(30, ymd(2022, 1, 10), 1.0, 1.0, 2.0),
            game(10, ymd(2022, 1, 10), 1.0, 1.0, 2.0),
            game(20, ymd(2022, 1, 10), 1.0, 1.0, 2.0),
        ];
        let games = classify(records, &SeasonCalendar::default());
        let ids: Vec<u32> = per28_last_games(&games, &Per28Config::default())
            .unwrap()
            .iter()
            .map(|l| l.player_id)
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_no_regular_games_is_empty_selection() {
        let records = vec![game(5, ymd(2022, 4, 20), 1.0, 1.0, 2.0)];
        let games = classify(records, &SeasonCalendar::default());
        assert!(matches!(
            per28_last_games(&games, &Per28Config::default()),
            Err(AnalysisError::EmptySelection { stage: Stage::Per28, .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: percentages equal summed makes / summed attempts over the window
            #[test]
            fn prop_pct_from_window_sums(
                shots in proptest::collection::vec((0u8..15, 0u8..15), 1..12)
            ) {
                let records: Vec<GameLogRecord> = shots
                    .iter()
                    .enumerate()
                    .map(|(i, (made, missed))| {
                        let fgm = *made as f64;
                        let fga = (*made + *missed) as f64;
                        let mut r = game(1, ymd(2021, 11, 1) + chrono::Duration::days(i as i64), fgm, fga, fgm * 2.0);
                        r.box_score.ftm = fgm;
                        r.box_score.fta = fga;
                        r
                    })
                    .collect();
                let games = classify(records, &SeasonCalendar::default());
                let line = &per28_last_games(&games, &Per28Config::default()).unwrap()[0];

                let start = shots.len().saturating_sub(5);
                let (made, att) = shots[start..].iter().fold((0.0, 0.0), |(m, a), (mk, ms)| {
                    (m + *mk as f64, a + (*mk + *ms) as f64)
                });
                let expected = if att > 0.0 { made / att } else { 0.0 };
                prop_assert_eq!(line.fg_pct, expected);
                prop_assert_eq!(line.ft_pct, expected);
                prop_assert_eq!(line.fg3_pct, 0.0);
                prop_assert!(line.fg_pct >= 0.0 && line.fg_pct <= 1.0);
            }
        }
    }
}
