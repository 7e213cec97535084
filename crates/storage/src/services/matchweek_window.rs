//! Matchweek selection for the schedule tab strip.

use crate::error::ScheduleError;
use crate::models::Matchweek;
use crate::services::clock::Clock;

pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Picks the matchweek whose reference date is closest to the clock's "now".
///
/// On equal distance the earlier matchweek in fixture order wins.
pub fn select_current_matchweek<'a, C>(
    matchweeks: &'a [Matchweek],
    clock: &C,
) -> Result<&'a Matchweek, ScheduleError>
where
    C: Clock + ?Sized,
{
    let now = clock.now().timestamp_millis();
    let distance = |mw: &Matchweek| mw.reference_date.timestamp_millis().abs_diff(now);

    let mut iter = matchweeks.iter();
    let mut nearest = iter.next().ok_or(ScheduleError::EmptySchedule)?;
    let mut nearest_distance = distance(nearest);

    for mw in iter {
        let d = distance(mw);
        if d < nearest_distance {
            nearest = mw;
            nearest_distance = d;
        }
    }

    Ok(nearest)
}

/// Returns up to `window_size` consecutive matchweeks with `current_id` as
/// close to the middle as the ends of the fixture allow.
pub fn select_window<'a>(
    matchweeks: &'a [Matchweek],
    current_id: &str,
    window_size: usize,
) -> Result<&'a [Matchweek], ScheduleError> {
    let index = matchweeks
        .iter()
        .position(|mw| mw.id == current_id)
        .ok_or_else(|| ScheduleError::MatchweekNotFound(current_id.to_string()))?;

    let start = window_start(index, matchweeks.len(), window_size);
    let end = (start + window_size).min(matchweeks.len());

    Ok(&matchweeks[start..end])
}

fn window_start(index: usize, len: usize, window_size: usize) -> usize {
    if len <= window_size {
        return 0;
    }

    index.saturating_sub(window_size / 2).min(len - window_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use crate::services::test_support::{kickoff, matchweek, weekly_matchweeks};
    use chrono::Duration;

    fn ids(window: &[Matchweek]) -> Vec<&str> {
        window.iter().map(|mw| mw.id.as_str()).collect()
    }

    #[test]
    fn test_window_clamped_at_start() {
        let mws = weekly_matchweeks(10);
        let window = select_window(&mws, "mw0", 5).unwrap();
        assert_eq!(window, &mws[0..5]);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let mws = weekly_matchweeks(10);
        let window = select_window(&mws, "mw9", 5).unwrap();
        assert_eq!(window, &mws[5..10]);
    }

    #[test]
    fn test_window_centered_in_the_middle() {
        let mws = weekly_matchweeks(10);
        let window = select_window(&mws, "mw4", 5).unwrap();
        assert_eq!(ids(window), vec!["mw2", "mw3", "mw4", "mw5", "mw6"]);
    }

    #[test]
    fn test_short_fixture_returned_whole() {
        let mws = weekly_matchweeks(3);
        let window = select_window(&mws, "mw2", 5).unwrap();
        assert_eq!(window, &mws[..]);
    }

    #[test]
    fn test_unknown_anchor() {
        let mws = weekly_matchweeks(4);
        assert_eq!(
            select_window(&mws, "stale", 5),
            Err(ScheduleError::MatchweekNotFound("stale".to_string()))
        );
    }

    #[test]
    fn test_window_length_and_contiguity() {
        for len in 1..=12 {
            let mws = weekly_matchweeks(len);
            for size in 1..=7 {
                for anchor in &mws {
                    let window = select_window(&mws, &anchor.id, size).unwrap();
                    assert_eq!(window.len(), size.min(len));
                    assert!(window.contains(anchor));

                    let start = mws.iter().position(|mw| mw.id == window[0].id).unwrap();
                    assert_eq!(window, &mws[start..start + window.len()]);
                }
            }
        }
    }

    #[test]
    fn test_anchor_exactly_centered_away_from_edges() {
        let len = 10;
        let mws = weekly_matchweeks(len);
        for size in 1..=6usize {
            let first = size / 2;
            let last = len - size.div_ceil(2);
            for i in first..=last {
                let window = select_window(&mws, &mws[i].id, size).unwrap();
                assert_eq!(window[size / 2].id, mws[i].id, "size {} anchor {}", size, i);
            }
        }
    }

    #[test]
    fn test_current_matchweek_is_nearest() {
        let mws = weekly_matchweeks(6);
        let clock = FixedClock(kickoff(15));
        let current = select_current_matchweek(&mws, &clock).unwrap();
        assert_eq!(current.id, "mw2");
    }

    #[test]
    fn test_current_matchweek_before_and_after_season() {
        let mws = weekly_matchweeks(6);

        let preseason = FixedClock(kickoff(-40));
        assert_eq!(select_current_matchweek(&mws, &preseason).unwrap().id, "mw0");

        let summer = FixedClock(kickoff(400));
        assert_eq!(select_current_matchweek(&mws, &summer).unwrap().id, "mw5");
    }

    #[test]
    fn test_current_matchweek_tie_prefers_earlier() {
        let mws = weekly_matchweeks(4);
        // halfway between mw1 and mw2
        let clock = FixedClock(kickoff(7) + Duration::hours(84));
        assert_eq!(select_current_matchweek(&mws, &clock).unwrap().id, "mw1");
    }

    #[test]
    fn test_current_matchweek_uses_dates_not_positions() {
        let mws = vec![
            matchweek("late", 60, Vec::new()),
            matchweek("early", 0, Vec::new()),
        ];
        let clock = FixedClock(kickoff(2));
        assert_eq!(select_current_matchweek(&mws, &clock).unwrap().id, "early");
    }

    #[test]
    fn test_current_matchweek_empty_schedule() {
        let clock = FixedClock(kickoff(0));
        let empty: Vec<Matchweek> = Vec::new();
        assert_eq!(
            select_current_matchweek(&empty, &clock),
            Err(ScheduleError::EmptySchedule)
        );
    }
}
