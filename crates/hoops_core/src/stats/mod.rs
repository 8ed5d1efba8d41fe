pub mod per28;
pub mod roster;

pub use per28::{per28_last_games, Per28Line};
pub use roster::{partition_rosters, RosterEntry, RosterPartition};
