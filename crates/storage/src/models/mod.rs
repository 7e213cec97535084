pub mod club;
pub mod competition;
pub mod schedule;
pub mod season;

pub use club::{Club, ClubSummary};
pub use competition::Competition;
pub use schedule::{Match, MatchResult, MatchSide, Matchweek, Schedule};
pub use season::season_label;
