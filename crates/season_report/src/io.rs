//! Game log CSV loading and report table writing.
//!
//! Loading is strict: the header is checked for every required column
//! before any row is read, and the first bad row aborts the load.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hoops_core::{parse_game_date, BoxScore, GameLogRecord};
use serde::Deserialize;

use crate::tables::TableRow;

/// Columns every input file must carry
pub const REQUIRED_COLUMNS: [&str; 20] = [
    "PLAYER_ID",
    "PLAYER_NAME",
    "TEAM",
    "game_date",
    "MIN",
    "FGM",
    "FGA",
    "FG3M",
    "FG3A",
    "FTM",
    "FTA",
    "OREB",
    "DREB",
    "AST",
    "TOV",
    "STL",
    "BLK",
    "PF",
    "PTS",
    "PLUS_MINUS",
];

/// One CSV row as it appears on disk
#[derive(Debug, Deserialize)]
struct RawGameLog {
    #[serde(rename = "PLAYER_ID")]
    player_id: u32,
    #[serde(rename = "PLAYER_NAME")]
    player_name: String,
    #[serde(rename = "TEAM")]
    team: String,
    #[serde(rename = "GAME_ID", default)]
    game_id: Option<String>,
    game_date: String,
    #[serde(rename = "MIN")]
    minutes: String,
    #[serde(rename = "FGM")]
    fgm: f64,
    #[serde(rename = "FGA")]
    fga: f64,
    #[serde(rename = "FG_PCT", default)]
    fg_pct: Option<f64>,
    #[serde(rename = "FG3M")]
    fg3m: f64,
    #[serde(rename = "FG3A")]
    fg3a: f64,
    #[serde(rename = "FG3_PCT", default)]
    fg3_pct: Option<f64>,
    #[serde(rename = "FTM")]
    ftm: f64,
    #[serde(rename = "FTA")]
    fta: f64,
    #[serde(rename = "FT_PCT", default)]
    ft_pct: Option<f64>,
    #[serde(rename = "OREB")]
    oreb: f64,
    #[serde(rename = "DREB")]
    dreb: f64,
    #[serde(rename = "AST")]
    ast: f64,
    #[serde(rename = "TOV")]
    tov: f64,
    #[serde(rename = "STL")]
    stl: f64,
    #[serde(rename = "BLK")]
    blk: f64,
    #[serde(rename = "PF")]
    pf: f64,
    #[serde(rename = "PTS")]
    pts: f64,
    #[serde(rename = "PLUS_MINUS")]
    plus_minus: f64,
}

/// Minutes as decimal (`34.5`) or clock (`34:30`)
fn parse_minutes(value: &str) -> Option<f64> {
    let value = value.trim();
    let minutes: f64 = match value.split_once(':') {
        Some((min, sec)) => {
            let min: f64 = min.parse().ok()?;
            let sec: f64 = sec.parse().ok()?;
            if !(0.0..60.0).contains(&sec) {
                return None;
            }
            min + sec / 60.0
        }
        None => value.parse().ok()?,
    };
    (minutes.is_finite() && minutes >= 0.0).then_some(minutes)
}

impl RawGameLog {
    /// Numeric cells by column name, published percentages included when present
    fn numeric_cells(&self) -> Vec<(&'static str, f64)> {
        let mut cells = vec![
            ("FGM", self.fgm),
            ("FGA", self.fga),
            ("FG3M", self.fg3m),
            ("FG3A", self.fg3a),
            ("FTM", self.ftm),
            ("FTA", self.fta),
            ("OREB", self.oreb),
            ("DREB", self.dreb),
            ("AST", self.ast),
            ("TOV", self.tov),
            ("STL", self.stl),
            ("BLK", self.blk),
            ("PF", self.pf),
            ("PTS", self.pts),
            ("PLUS_MINUS", self.plus_minus),
        ];
        let published = [("FG_PCT", self.fg_pct), ("FG3_PCT", self.fg3_pct), ("FT_PCT", self.ft_pct)];
        cells.extend(published.into_iter().filter_map(|(name, v)| v.map(|v| (name, v))));
        cells
    }

    fn into_record(self, line: u64) -> Result<GameLogRecord> {
        let game_date = parse_game_date(&self.game_date).with_context(|| format!("Line {}", line))?;
        let Some(minutes) = parse_minutes(&self.minutes) else {
            bail!("Line {} - Invalid MIN value: '{}'", line, self.minutes);
        };
        // csv/serde accept `inf` and `NaN` for f64
        if let Some((column, value)) = self.numeric_cells().into_iter().find(|(_, v)| !v.is_finite()) {
            bail!("Line {} - Invalid {} value: '{}'", line, column, value);
        }

        Ok(GameLogRecord {
            player_id: self.player_id,
            player_name: self.player_name,
            team: self.team,
            game_id: self.game_id.filter(|id| !id.is_empty()),
            game_date,
            minutes,
            box_score: BoxScore {
                fgm: self.fgm,
                fga: self.fga,
                fg3m: self.fg3m,
                fg3a: self.fg3a,
                ftm: self.ftm,
                fta: self.fta,
                oreb: self.oreb,
                dreb: self.dreb,
                ast: self.ast,
                tov: self.tov,
                stl: self.stl,
                blk: self.blk,
                pf: self.pf,
                pts: self.pts,
                plus_minus: self.plus_minus,
            },
            fg_pct: self.fg_pct,
        })
    }
}

/// Read every game log row from `csv_path`, in file order.
///
/// # Errors
///
/// * missing required columns (all of them listed at once)
/// * a row that does not deserialize, or has a malformed date / minutes
/// * a file with a header but no rows
pub fn load_game_logs(csv_path: &Path) -> Result<Vec<GameLogRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    // Strip BOM so the first column still matches by name
    let headers: csv::StringRecord = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();
    reader.set_headers(headers.clone());

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!(
            "Missing required columns in {}: {}",
            csv_path.display(),
            missing.join(", ")
        );
    }

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<RawGameLog>().enumerate() {
        // header is line 1
        let line = idx as u64 + 2;
        let raw = row.with_context(|| format!("Line {} - CSV parse error", line))?;
        records.push(raw.into_record(line)?);
    }

    if records.is_empty() {
        bail!("No game log rows in {}", csv_path.display());
    }

    log::info!("Loaded {} game log rows from {}", records.len(), csv_path.display());
    Ok(records)
}

/// Write `rows` as a CSV table at `path`, replacing any existing file.
/// The header is always written, even for an empty table.
pub fn write_table<T: TableRow>(path: &Path, rows: &[T]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    writer.write_record(T::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "GAME_ID,game_date,TEAM,TEAM_ID,PLAYER_ID,PLAYER_NAME,MIN,FGM,FGA,FG_PCT,FG3M,FG3A,FG3_PCT,FTM,FTA,FT_PCT,OREB,DREB,REB,AST,TOV,STL,BLK,PF,PTS,PLUS_MINUS";

    fn csv_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_schema() {
        let file = csv_file(&format!(
            "{}\n22100001,2021-10-19T00:00:00,MIL,1610612749,203507,Giannis Antetokounmpo,37:05,11,22,0.5,1,3,0.333,9,13,0.692,2,12,14,7,3,1,2,3,32,13\n",
            HEADER
        ));
        let records = load_game_logs(file.path()).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.player_id, 203507);
        assert_eq!(r.team, "MIL");
        assert_eq!(r.game_id.as_deref(), Some("22100001"));
        assert_eq!(r.game_date, chrono::NaiveDate::from_ymd_opt(2021, 10, 19).unwrap());
        assert!((r.minutes - (37.0 + 5.0 / 60.0)).abs() < 1e-12);
        assert_eq!(r.box_score.pts, 32.0);
        assert_eq!(r.box_score.dreb, 12.0);
        assert_eq!(r.fg_pct, Some(0.5));
    }

    #[test]
    fn test_optional_columns_may_be_absent_or_blank() {
        let file = csv_file(
            "PLAYER_ID,PLAYER_NAME,TEAM,game_date,MIN,FGM,FGA,FG3M,FG3A,FTM,FTA,OREB,DREB,AST,TOV,STL,BLK,PF,PTS,PLUS_MINUS,FT_PCT\n\
             1,A B,BOS,2022-01-02,12.5,0,0,0,0,0,0,0,1,0,0,0,0,1,0,-4,\n",
        );
        let records = load_game_logs(file.path()).unwrap();
        assert_eq!(records[0].game_id, None);
        assert_eq!(records[0].fg_pct, None);
        assert_eq!(records[0].minutes, 12.5);
        assert_eq!(records[0].box_score.plus_minus, -4.0);
    }

    #[test]
    fn test_missing_columns_listed() {
        let file = csv_file("PLAYER_ID,PLAYER_NAME,game_date\n1,A,2022-01-01\n");
        let err = load_game_logs(file.path()).unwrap_err().to_string();
        assert!(err.contains("Missing required columns"), "{}", err);
        assert!(err.contains("TEAM"));
        assert!(err.contains("PLUS_MINUS"));
        assert!(!err.contains("PLAYER_NAME,"));
    }

    #[test]
    fn test_malformed_date_names_line() {
        let file = csv_file(&format!(
            "{}\n1,2022-01-01,BOS,1,7,X,30,1,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1\n1,01/02/2022,BOS,1,7,X,30,1,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1\n",
            HEADER
        ));
        let err = load_game_logs(file.path()).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Line 3"), "{}", chain);
        assert!(chain.contains("01/02/2022"), "{}", chain);
    }

    #[test]
    fn test_non_numeric_stat_rejected() {
        let file = csv_file(&format!(
            "{}\n1,2022-01-01,BOS,1,7,X,30,one,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1\n",
            HEADER
        ));
        let chain = format!("{:#}", load_game_logs(file.path()).unwrap_err());
        assert!(chain.contains("Line 2"), "{}", chain);
    }

    #[test]
    fn test_non_finite_stat_rejected() {
        for (cells, column) in [
            ("30,1,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,inf,NaN", "PTS"),
            ("30,1,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,NaN", "PLUS_MINUS"),
            ("30,1,2,infinity,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1", "FG_PCT"),
            ("30,1,-inf,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1", "FGA"),
        ] {
            let file = csv_file(&format!(
                "{}\n1,2022-01-01,BOS,1,7,X,30,1,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1\n1,2022-01-02,BOS,1,7,X,{}\n",
                HEADER, cells
            ));
            let chain = format!("{:#}", load_game_logs(file.path()).unwrap_err());
            assert!(chain.contains("Line 3"), "{}", chain);
            assert!(chain.contains(&format!("Invalid {} value", column)), "{}", chain);
        }
    }

    #[test]
    fn test_header_only_is_error() {
        let file = csv_file(&format!("{}\n", HEADER));
        assert!(load_game_logs(file.path()).unwrap_err().to_string().contains("No game log rows"));
    }

    #[test]
    fn test_bom_header_accepted() {
        let file = csv_file(&format!(
            "\u{feff}{}\n1,2022-01-01,BOS,1,7,X,30,1,2,0.5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,1\n",
            HEADER
        ));
        assert_eq!(load_game_logs(file.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_game_logs(Path::new("/nonexistent/logs.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("36"), Some(36.0));
        assert_eq!(parse_minutes("12:30"), Some(12.5));
        assert_eq!(parse_minutes(" 0 "), Some(0.0));
        assert_eq!(parse_minutes("12:75"), None);
        assert_eq!(parse_minutes("-3"), None);
        assert_eq!(parse_minutes("DNP"), None);
    }
}
