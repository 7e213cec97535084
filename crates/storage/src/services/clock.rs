use chrono::{DateTime, Utc};

use crate::models::season_label;

/// Source of "now" for computations that depend on the current date.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Season label for today, e.g. "2023/24".
    fn current_season(&self) -> String {
        season_label(self.now().date_naive())
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
