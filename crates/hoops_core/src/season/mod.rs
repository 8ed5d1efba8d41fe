//! Season phase and all-star side tagging.
//!
//! Tags are pure functions of the game date and a [`SeasonCalendar`];
//! once a record is tagged it never changes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::SeasonCalendar;
use crate::error::{AnalysisError, Result};
use crate::models::GameLogRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    Regular,
    PlayIn,
    Playoffs,
}

impl SeasonPhase {
    pub fn all() -> &'static [SeasonPhase] {
        &[SeasonPhase::Regular, SeasonPhase::PlayIn, SeasonPhase::Playoffs]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SeasonPhase::Regular => "regular",
            SeasonPhase::PlayIn => "play_in",
            SeasonPhase::Playoffs => "playoffs",
        }
    }

    pub fn of(date: NaiveDate, calendar: &SeasonCalendar) -> Self {
        if date >= calendar.playoffs_start {
            SeasonPhase::Playoffs
        } else if date >= calendar.play_in_start {
            SeasonPhase::PlayIn
        } else {
            SeasonPhase::Regular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllStarSide {
    Before,
    After,
}

impl AllStarSide {
    pub fn name(&self) -> &'static str {
        match self {
            AllStarSide::Before => "before",
            AllStarSide::After => "after",
        }
    }

    pub fn of(date: NaiveDate, calendar: &SeasonCalendar) -> Self {
        if date >= calendar.all_star_break {
            AllStarSide::After
        } else {
            AllStarSide::Before
        }
    }
}

/// A game record with its derived tags.
///
/// `source_index` is the record's position in the input and breaks ties
/// wherever games are ordered by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedGame {
    pub record: GameLogRecord,
    pub phase: SeasonPhase,
    pub all_star_side: AllStarSide,
    pub source_index: usize,
}

impl TaggedGame {
    pub fn tag(record: GameLogRecord, source_index: usize, calendar: &SeasonCalendar) -> Self {
        let phase = SeasonPhase::of(record.game_date, calendar);
        let all_star_side = AllStarSide::of(record.game_date, calendar);
        Self { record, phase, all_star_side, source_index }
    }
}

/// Tag every record, keeping input order.
pub fn classify(records: Vec<GameLogRecord>, calendar: &SeasonCalendar) -> Vec<TaggedGame> {
    let games: Vec<TaggedGame> = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| TaggedGame::tag(record, idx, calendar))
        .collect();

    let mut counts = [0usize; 3];
    for game in &games {
        counts[game.phase as usize] += 1;
    }
    log::info!(
        "Classified {} games: {} regular, {} play-in, {} playoffs",
        games.len(),
        counts[0],
        counts[1],
        counts[2]
    );

    games
}

/// Datetime layouts accepted for a `game_date` cell besides a bare date
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a `game_date` cell.
///
/// Accepts `YYYY-MM-DD`, or that date followed by `T` or a space and a
/// full `HH:MM:SS` time of day. The time is validated, then dropped.
pub fn parse_game_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| AnalysisError::InvalidDate { value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ymd;
    use crate::models::BoxScore;

    fn record_on(date: NaiveDate) -> GameLogRecord {
        GameLogRecord::new(1, "Test", "BOS", date, 20.0, BoxScore::default())
    }

    #[test]
    fn test_phase_boundaries_belong_to_later_phase() {
        let cal = SeasonCalendar::default();
        assert_eq!(SeasonPhase::of(ymd(2022, 4, 10), &cal), SeasonPhase::Regular);
        assert_eq!(SeasonPhase::of(ymd(2022, 4, 11), &cal), SeasonPhase::PlayIn);
        assert_eq!(SeasonPhase::of(ymd(2022, 4, 14), &cal), SeasonPhase::PlayIn);
        assert_eq!(SeasonPhase::of(ymd(2022, 4, 15), &cal), SeasonPhase::Playoffs);
        assert_eq!(SeasonPhase::of(ymd(2022, 6, 16), &cal), SeasonPhase::Playoffs);
    }

    #[test]
    fn test_all_star_boundary() {
        let cal = SeasonCalendar::default();
        assert_eq!(AllStarSide::of(ymd(2022, 2, 17), &cal), AllStarSide::Before);
        assert_eq!(AllStarSide::of(ymd(2022, 2, 18), &cal), AllStarSide::After);
        assert_eq!(AllStarSide::of(ymd(2021, 10, 19), &cal), AllStarSide::Before);
        // play-in and playoff games count as after the break
        assert_eq!(AllStarSide::of(ymd(2022, 4, 20), &cal), AllStarSide::After);
    }

    #[test]
    fn test_classify_keeps_order_and_indexes() {
        let records = vec![
            record_on(ymd(2022, 4, 20)),
            record_on(ymd(2021, 11, 2)),
            record_on(ymd(2022, 4, 12)),
        ];
        let games = classify(records, &SeasonCalendar::default());
        let phases: Vec<_> = games.iter().map(|g| g.phase).collect();
        assert_eq!(phases, vec![SeasonPhase::Playoffs, SeasonPhase::Regular, SeasonPhase::PlayIn]);
        let indexes: Vec<_> = games.iter().map(|g| g.source_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_game_date_formats() {
        assert_eq!(parse_game_date("2022-04-15").unwrap(), ymd(2022, 4, 15));
        assert_eq!(parse_game_date("2022-04-15T00:00:00").unwrap(), ymd(2022, 4, 15));
        assert_eq!(parse_game_date(" 2021-12-25 19:30:00 ").unwrap(), ymd(2021, 12, 25));
    }

    #[test]
    fn test_parse_game_date_rejects_garbage() {
        for bad in [
            "",
            "04/15/2022",
            "2022-13-01",
            "2022-02-30",
            "yesterday",
            "2022-04-15Tgarbage",
            "2022-04-15 not a time",
            "2022-04-15T25:00:00",
            "2022-04-15T",
        ] {
            match parse_game_date(bad) {
                Err(AnalysisError::InvalidDate { value }) => assert_eq!(value, bad),
                other => panic!("expected InvalidDate for {:?}, got {:?}", bad, other),
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every date gets exactly one phase, consistent with the cutoffs
            #[test]
            fn prop_phase_is_total_and_ordered(offset in -400i64..400i64) {
                let cal = SeasonCalendar::default();
                let date = cal.play_in_start + chrono::Duration::days(offset);
                let phase = SeasonPhase::of(date, &cal);
                let in_regular = date < cal.play_in_start;
                let in_play_in = date >= cal.play_in_start && date < cal.playoffs_start;
                let in_playoffs = date >= cal.playoffs_start;
                prop_assert_eq!(
                    [in_regular, in_play_in, in_playoffs].iter().filter(|b| **b).count(),
                    1
                );
                prop_assert_eq!(phase == SeasonPhase::Regular, in_regular);
                prop_assert_eq!(phase == SeasonPhase::PlayIn, in_play_in);
                prop_assert_eq!(phase == SeasonPhase::Playoffs, in_playoffs);
            }

            /// Property: tags are monotonic in date
            #[test]
            fn prop_tags_monotonic(a in -400i64..400i64, b in -400i64..400i64) {
                let cal = SeasonCalendar::default();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let d_lo = cal.all_star_break + chrono::Duration::days(lo);
                let d_hi = cal.all_star_break + chrono::Duration::days(hi);
                prop_assert!(SeasonPhase::of(d_lo, &cal) <= SeasonPhase::of(d_hi, &cal));
                prop_assert!(AllStarSide::of(d_lo, &cal) <= AllStarSide::of(d_hi, &cal));
            }

            /// Property: any formatted calendar date parses back to itself
            #[test]
            fn prop_parse_formatted_date(offset in 0i64..3000) {
                let date = ymd(2015, 1, 1) + chrono::Duration::days(offset);
                let text = date.format("%Y-%m-%d").to_string();
                prop_assert_eq!(parse_game_date(&text).unwrap(), date);
                let with_time = format!("{}T00:00:00", text);
                prop_assert_eq!(parse_game_date(&with_time).unwrap(), date);
            }
        }
    }
}
