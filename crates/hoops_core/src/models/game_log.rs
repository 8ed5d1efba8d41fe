use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counting stats for one game, or a sum/scaling of several games.
///
/// Rebounds stay split offensive/defensive; minutes live on the record,
/// not here, because they are never rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub fgm: f64,
    pub fga: f64,
    pub fg3m: f64,
    pub fg3a: f64,
    pub ftm: f64,
    pub fta: f64,
    pub oreb: f64,
    pub dreb: f64,
    pub ast: f64,
    pub tov: f64,
    pub stl: f64,
    pub blk: f64,
    pub pf: f64,
    pub pts: f64,
    pub plus_minus: f64,
}

impl BoxScore {
    /// Add another line into this one, field by field
    pub fn accumulate(&mut self, other: &BoxScore) {
        self.fgm += other.fgm;
        self.fga += other.fga;
        self.fg3m += other.fg3m;
        self.fg3a += other.fg3a;
        self.ftm += other.ftm;
        self.fta += other.fta;
        self.oreb += other.oreb;
        self.dreb += other.dreb;
        self.ast += other.ast;
        self.tov += other.tov;
        self.stl += other.stl;
        self.blk += other.blk;
        self.pf += other.pf;
        self.pts += other.pts;
        self.plus_minus += other.plus_minus;
    }

    /// Every field divided by `divisor`
    pub fn scaled(&self, divisor: f64) -> BoxScore {
        BoxScore {
            fgm: self.fgm / divisor,
            fga: self.fga / divisor,
            fg3m: self.fg3m / divisor,
            fg3a: self.fg3a / divisor,
            ftm: self.ftm / divisor,
            fta: self.fta / divisor,
            oreb: self.oreb / divisor,
            dreb: self.dreb / divisor,
            ast: self.ast / divisor,
            tov: self.tov / divisor,
            stl: self.stl / divisor,
            blk: self.blk / divisor,
            pf: self.pf / divisor,
            pts: self.pts / divisor,
            plus_minus: self.plus_minus / divisor,
        }
    }

    pub fn total_rebounds(&self) -> f64 {
        self.oreb + self.dreb
    }

    pub fn field_goal_pct(&self) -> f64 {
        shooting_pct(self.fgm, self.fga)
    }

    pub fn three_point_pct(&self) -> f64 {
        shooting_pct(self.fg3m, self.fg3a)
    }

    pub fn free_throw_pct(&self) -> f64 {
        shooting_pct(self.ftm, self.fta)
    }
}

/// makes / attempts, 0 when nothing was attempted
pub fn shooting_pct(makes: f64, attempts: f64) -> f64 {
    if attempts > 0.0 {
        makes / attempts
    } else {
        0.0
    }
}

/// One player's line for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogRecord {
    pub player_id: u32,
    pub player_name: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub game_date: NaiveDate,
    pub minutes: f64,
    pub box_score: BoxScore,
    /// Per-game FG% as published in the source, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg_pct: Option<f64>,
}

impl GameLogRecord {
    pub fn new(
        player_id: u32,
        player_name: impl Into<String>,
        team: impl Into<String>,
        game_date: NaiveDate,
        minutes: f64,
        box_score: BoxScore,
    ) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            team: team.into(),
            game_id: None,
            game_date,
            minutes,
            box_score,
            fg_pct: None,
        }
    }

    /// Per-game FG%: the published value if the source had one, otherwise
    /// recomputed from makes and attempts.
    pub fn field_goal_pct(&self) -> f64 {
        self.fg_pct.unwrap_or_else(|| self.box_score.field_goal_pct())
    }

    pub fn points(&self) -> f64 {
        self.box_score.pts
    }
}
