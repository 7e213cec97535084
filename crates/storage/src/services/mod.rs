pub mod clock;
pub mod matchweek_window;
pub mod recent_matches;
pub mod standings;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use matchweek_window::{DEFAULT_WINDOW_SIZE, select_current_matchweek, select_window};
pub use recent_matches::{RecentMatches, latest_played_matches, latest_played_matchweek};
pub use standings::{FORM_LENGTH, compute_standings};
