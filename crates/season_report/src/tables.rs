//! Output table row shapes. Column names follow the source data's
//! upper-case convention.

use hoops_core::{AllStarRow, Coefficient, Per28Line, RosterEntry, SignificantPredictor, TeamHistogram};
use serde::Serialize;

/// A row type with a fixed header, written even when the table is empty
pub trait TableRow: Serialize {
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Per28Row {
    pub player_id: u32,
    pub fgm: f64,
    pub fga: f64,
    pub fg3m: f64,
    pub fg3a: f64,
    pub ftm: f64,
    pub fta: f64,
    pub oreb: f64,
    pub dreb: f64,
    pub reb: f64,
    pub ast: f64,
    pub tov: f64,
    pub stl: f64,
    pub blk: f64,
    pub pf: f64,
    pub pts: f64,
    pub plus_minus: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
}

impl TableRow for Per28Row {
    const HEADER: &'static [&'static str] = &[
        "PLAYER_ID", "FGM", "FGA", "FG3M", "FG3A", "FTM", "FTA", "OREB", "DREB", "REB", "AST", "TOV", "STL",
        "BLK", "PF", "PTS", "PLUS_MINUS", "FG_PCT", "FG3_PCT", "FT_PCT",
    ];
}

impl From<&Per28Line> for Per28Row {
    fn from(line: &Per28Line) -> Self {
        let s = &line.per28;
        Self {
            player_id: line.player_id,
            fgm: s.fgm,
            fga: s.fga,
            fg3m: s.fg3m,
            fg3a: s.fg3a,
            ftm: s.ftm,
            fta: s.fta,
            oreb: s.oreb,
            dreb: s.dreb,
            reb: s.total_rebounds(),
            ast: s.ast,
            tov: s.tov,
            stl: s.stl,
            blk: s.blk,
            pf: s.pf,
            pts: s.pts,
            plus_minus: s.plus_minus,
            fg_pct: line.fg_pct,
            fg3_pct: line.fg3_pct,
            ft_pct: line.ft_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RosterRow {
    pub player_id: u32,
    pub player_name: String,
}

impl TableRow for RosterRow {
    const HEADER: &'static [&'static str] = &["PLAYER_ID", "PLAYER_NAME"];
}

impl From<&RosterEntry> for RosterRow {
    fn from(entry: &RosterEntry) -> Self {
        Self { player_id: entry.player_id, player_name: entry.player_name.clone() }
    }
}

/// `AAS_PPG`: 1 when after-all-star-break points per game beat the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AllStarDatasetRow {
    pub player_name: String,
    pub fg_pct: f64,
    pub fg3a: f64,
    pub fta: f64,
    pub ast: f64,
    pub tov: f64,
    pub oreb: f64,
    pub aas_ppg: u8,
}

impl TableRow for AllStarDatasetRow {
    const HEADER: &'static [&'static str] =
        &["PLAYER_NAME", "FG_PCT", "FG3A", "FTA", "AST", "TOV", "OREB", "AAS_PPG"];
}

impl From<&AllStarRow> for AllStarDatasetRow {
    fn from(row: &AllStarRow) -> Self {
        let [fg_pct, fg3a, fta, ast, tov, oreb] = row.features;
        Self { player_name: row.player_name.clone(), fg_pct, fg3a, fta, ast, tov, oreb, aas_ppg: row.label }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CoefficientRow {
    pub term: String,
    pub estimate: f64,
    pub std_err: f64,
    pub z: f64,
    pub p_value: f64,
}

impl TableRow for CoefficientRow {
    const HEADER: &'static [&'static str] = &["TERM", "ESTIMATE", "STD_ERR", "Z", "P_VALUE"];
}

impl From<&Coefficient> for CoefficientRow {
    fn from(c: &Coefficient) -> Self {
        Self { term: c.term.clone(), estimate: c.estimate, std_err: c.std_error, z: c.z, p_value: c.p_value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PredictorRow {
    pub predictor: String,
    pub p_value: f64,
}

impl TableRow for PredictorRow {
    const HEADER: &'static [&'static str] = &["PREDICTOR", "P_VALUE"];
}

impl From<&SignificantPredictor> for PredictorRow {
    fn from(p: &SignificantPredictor) -> Self {
        Self { predictor: p.predictor.clone(), p_value: p.p_value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DistributionRow {
    pub team: String,
    pub bin_start: f64,
    pub bin_end: f64,
    pub count: u32,
}

impl TableRow for DistributionRow {
    const HEADER: &'static [&'static str] = &["TEAM", "BIN_START", "BIN_END", "COUNT"];
}

impl DistributionRow {
    /// One row per (team, bin)
    pub fn from_panel(panel: &TeamHistogram, edges: &[f64]) -> Vec<Self> {
        panel
            .counts
            .iter()
            .enumerate()
            .map(|(b, count)| Self {
                team: panel.team.clone(),
                bin_start: edges[b],
                bin_end: edges[b + 1],
                count: *count,
            })
            .collect()
    }
}
