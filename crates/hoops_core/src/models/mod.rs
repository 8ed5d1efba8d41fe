pub mod game_log;

pub use game_log::{shooting_pct, BoxScore, GameLogRecord};
