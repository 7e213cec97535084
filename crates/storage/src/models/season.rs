use chrono::{Datelike, NaiveDate};

/// Month in which a new season starts.
pub const SEASON_START_MONTH: u32 = 7;

/// Season label ("2023/24") a date belongs to.
///
/// Seasons run from July to June: dates before July belong to the season that
/// started the previous calendar year.
pub fn season_label(date: NaiveDate) -> String {
    let start_year = if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };

    format!("{}/{:02}", start_year, (start_year + 1).rem_euclid(100))
}
