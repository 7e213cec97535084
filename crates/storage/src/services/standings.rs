//! League table computation.
//!
//! Points are taken from each side as recorded in the fixture.

use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::standings::StandingItem;
use crate::error::ScheduleError;
use crate::models::{ClubSummary, MatchResult, MatchSide, Schedule};

/// Number of results shown in the form strip.
pub const FORM_LENGTH: usize = 5;

struct StandingAccumulator {
    club: ClubSummary,
    played_matches: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    goals_for: i32,
    goals_against: i32,
    points: i32,
    recent_results: Vec<MatchResult>,
}

impl StandingAccumulator {
    fn new(club: ClubSummary) -> Self {
        Self {
            club,
            played_matches: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
            recent_results: Vec::new(),
        }
    }

    fn record(&mut self, totals: Totals, result: MatchResult) {
        self.played_matches += 1;
        self.goals_for = totals.goals_for;
        self.goals_against = totals.goals_against;
        self.points = totals.points;

        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => self.draws += 1,
        }

        self.recent_results.push(result);
    }

    fn into_item(self) -> StandingItem {
        let form_start = self.recent_results.len().saturating_sub(FORM_LENGTH);

        StandingItem {
            club: self.club,
            played_matches: self.played_matches,
            wins: self.wins,
            losses: self.losses,
            draws: self.draws,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            goal_difference: self.goals_for - self.goals_against,
            points: self.points,
            latest_games: self.recent_results[form_start..].to_vec(),
        }
    }
}

/// Running totals of a club once one more match side is added.
#[derive(Clone, Copy)]
struct Totals {
    goals_for: i32,
    goals_against: i32,
    points: i32,
}

/// `None` when adding `side` would overflow the club's totals or its goal
/// difference.
fn tally(
    table: &[StandingAccumulator],
    positions: &HashMap<Uuid, usize>,
    side: &MatchSide,
) -> Option<Totals> {
    let (goals_for, goals_against, points) = positions
        .get(&side.club.club_id)
        .map(|&index| &table[index])
        .map_or((0, 0, 0), |acc| (acc.goals_for, acc.goals_against, acc.points));

    let totals = Totals {
        goals_for: goals_for.checked_add(side.goals_for())?,
        goals_against: goals_against.checked_add(side.goals_against())?,
        points: points.checked_add(side.points())?,
    };
    totals.goals_for.checked_sub(totals.goals_against)?;

    Some(totals)
}

/// Table order: points, then goal difference, then goals scored, all descending.
pub fn compare_standings(a: &StandingItem, b: &StandingItem) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Builds the league table for a season.
///
/// Only played matches count. A match whose recorded result is inconsistent,
/// or whose numbers would overflow a club's totals, is logged and left out of
/// the table. Clubs that have not played yet get no
/// row. Clubs level on every criterion keep the order in which they first
/// appear in the fixture.
pub fn compute_standings(schedule: Option<&Schedule>) -> Result<Vec<StandingItem>, ScheduleError> {
    let schedule = schedule.ok_or(ScheduleError::MissingSchedule)?;

    let mut table: Vec<StandingAccumulator> = Vec::new();
    let mut positions: HashMap<Uuid, usize> = HashMap::new();

    for game in schedule.matches().filter(|m| m.is_played()) {
        if let Err(e) = game.validate_result() {
            tracing::warn!(
                schedule_id = %schedule.schedule_id,
                error = %e,
                "Skipping match with invalid result"
            );
            continue;
        }

        if game.home.club.club_id == game.away.club.club_id {
            tracing::warn!(
                schedule_id = %schedule.schedule_id,
                match_id = %game.id,
                "Skipping match of a club against itself"
            );
            continue;
        }

        let (Some(home_totals), Some(away_totals)) = (
            tally(&table, &positions, &game.home),
            tally(&table, &positions, &game.away),
        ) else {
            tracing::warn!(
                schedule_id = %schedule.schedule_id,
                match_id = %game.id,
                "Skipping match whose goals or points overflow the table"
            );
            continue;
        };

        for (side, totals) in [(&game.home, home_totals), (&game.away, away_totals)] {
            let Some(result) = side.result else {
                continue;
            };

            let index = *positions.entry(side.club.club_id).or_insert_with(|| {
                table.push(StandingAccumulator::new(side.club.clone()));
                table.len() - 1
            });

            table[index].record(totals, result);
        }
    }

    let mut standings: Vec<StandingItem> = table
        .into_iter()
        .map(StandingAccumulator::into_item)
        .collect();

    // stable: full ties keep first-appearance order
    standings.sort_by(compare_standings);

    Ok(standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult::{Draw, Loss, Win};
    use crate::services::test_support::{club, matchweek, played, schedule, unplayed};

    fn row<'a>(standings: &'a [StandingItem], name: &str) -> &'a StandingItem {
        standings
            .iter()
            .find(|item| item.club.common_name == name)
            .unwrap()
    }

    fn names(standings: &[StandingItem]) -> Vec<&str> {
        standings
            .iter()
            .map(|item| item.club.common_name.as_str())
            .collect()
    }

    fn three_club_schedule() -> Schedule {
        let (a, b, c) = (club(1, "A"), club(2, "B"), club(3, "C"));
        schedule(vec![
            matchweek("1", 0, vec![played("m1", &a, 2, &b, 0)]),
            matchweek("2", 7, vec![played("m2", &b, 1, &c, 1)]),
            matchweek("3", 14, vec![played("m3", &c, 3, &a, 1)]),
        ])
    }

    #[test]
    fn test_three_club_table() {
        let standings = compute_standings(Some(&three_club_schedule())).unwrap();

        assert_eq!(names(&standings), vec!["C", "A", "B"]);

        let a = row(&standings, "A");
        assert_eq!(
            (a.played_matches, a.wins, a.losses, a.draws),
            (2, 1, 1, 0)
        );
        assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (3, 3, 0));
        assert_eq!(a.points, 3);
        assert_eq!(a.latest_games, vec![Win, Loss]);

        let b = row(&standings, "B");
        assert_eq!((b.wins, b.losses, b.draws), (0, 1, 1));
        assert_eq!((b.goals_for, b.goals_against, b.goal_difference), (1, 3, -2));
        assert_eq!(b.points, 1);

        let c = row(&standings, "C");
        assert_eq!((c.wins, c.losses, c.draws), (1, 0, 1));
        assert_eq!((c.goals_for, c.goals_against, c.goal_difference), (4, 2, 2));
        assert_eq!(c.points, 4);
        assert_eq!(c.latest_games, vec![Draw, Win]);
    }

    #[test]
    fn test_missing_schedule() {
        assert_eq!(compute_standings(None), Err(ScheduleError::MissingSchedule));
    }

    #[test]
    fn test_only_unplayed_matches_gives_empty_table() {
        let (a, b) = (club(1, "A"), club(2, "B"));
        let s = schedule(vec![matchweek(
            "1",
            0,
            vec![unplayed("m1", &a, &b), unplayed("m2", &b, &a)],
        )]);

        assert!(compute_standings(Some(&s)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_fixture_gives_empty_table() {
        assert!(compute_standings(Some(&schedule(Vec::new()))).unwrap().is_empty());
    }

    #[test]
    fn test_club_without_played_match_has_no_row() {
        let (a, b, c) = (club(1, "A"), club(2, "B"), club(3, "C"));
        let s = schedule(vec![matchweek(
            "1",
            0,
            vec![played("m1", &a, 1, &b, 0), unplayed("m2", &c, &a)],
        )]);

        let standings = compute_standings(Some(&s)).unwrap();
        assert_eq!(names(&standings), vec!["A", "B"]);
        assert_eq!(row(&standings, "A").played_matches, 1);
    }

    #[test]
    fn test_form_keeps_last_five_in_chronological_order() {
        let (a, b) = (club(1, "A"), club(2, "B"));
        let scores = [(1, 0), (0, 1), (2, 2), (3, 0), (0, 0), (1, 2), (4, 1)];
        let fixture = scores
            .iter()
            .enumerate()
            .map(|(i, &(home, away))| {
                matchweek(
                    &i.to_string(),
                    7 * i as i64,
                    vec![played(&format!("m{}", i), &a, home, &b, away)],
                )
            })
            .collect();

        let standings = compute_standings(Some(&schedule(fixture))).unwrap();

        let a = row(&standings, "A");
        assert_eq!(a.played_matches, 7);
        assert_eq!(a.latest_games, vec![Draw, Win, Draw, Loss, Win]);

        let b = row(&standings, "B");
        assert_eq!(b.latest_games, vec![Draw, Loss, Draw, Win, Loss]);
    }

    #[test]
    fn test_points_are_taken_from_fixture() {
        let (a, b) = (club(1, "A"), club(2, "B"));
        let mut game = played("m1", &a, 2, &b, 1);
        game.home.points = Some(2);
        game.away.points = Some(1);
        let s = schedule(vec![matchweek("1", 0, vec![game])]);

        let standings = compute_standings(Some(&s)).unwrap();
        assert_eq!(row(&standings, "A").points, 2);
        assert_eq!(row(&standings, "B").points, 1);
    }

    #[test]
    fn test_missing_numbers_count_as_zero() {
        let (a, b) = (club(1, "A"), club(2, "B"));
        let mut game = played("m1", &a, 0, &b, 0);
        game.home.points = None;
        game.home.goals_for = None;
        game.home.goals_against = None;
        let s = schedule(vec![matchweek("1", 0, vec![game])]);

        let standings = compute_standings(Some(&s)).unwrap();
        let a = row(&standings, "A");
        assert_eq!((a.points, a.goals_for, a.goals_against), (0, 0, 0));
        assert_eq!(a.draws, 1);
    }

    #[test]
    fn test_invalid_match_is_skipped() {
        let (a, b, c) = (club(1, "A"), club(2, "B"), club(3, "C"));
        let mut broken = played("m2", &b, 1, &c, 0);
        broken.away.result = Some(Win);
        let s = schedule(vec![matchweek(
            "1",
            0,
            vec![played("m1", &a, 1, &b, 0), broken],
        )]);

        let standings = compute_standings(Some(&s)).unwrap();
        assert_eq!(names(&standings), vec!["A", "B"]);
        assert_eq!(row(&standings, "B").played_matches, 1);
    }

    #[test]
    fn test_tie_breaks_goal_difference_then_goals_for() {
        let clubs: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, name)| club(i as u128 + 1, name))
            .collect();
        let (a, b, c, d) = (&clubs[0], &clubs[1], &clubs[2], &clubs[3]);

        // A and B: 3 pts, GD +1 each, A scores more. C: 3 pts, GD +3.
        let s = schedule(vec![matchweek(
            "1",
            0,
            vec![
                played("m1", a, 3, d, 2),
                played("m2", b, 1, d, 0),
                played("m3", c, 3, d, 0),
            ],
        )]);

        let standings = compute_standings(Some(&s)).unwrap();
        assert_eq!(names(&standings), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_full_ties_keep_first_appearance_order() {
        let (a, b, c, d) = (club(1, "A"), club(2, "B"), club(3, "C"), club(4, "D"));
        let s = schedule(vec![matchweek(
            "1",
            0,
            vec![played("m1", &c, 1, &d, 1), played("m2", &a, 1, &b, 1)],
        )]);

        let standings = compute_standings(Some(&s)).unwrap();
        assert_eq!(names(&standings), vec!["C", "D", "A", "B"]);
    }

    #[test]
    fn test_match_overflowing_totals_is_skipped() {
        let (a, b) = (club(1, "A"), club(2, "B"));
        let s = schedule(vec![
            matchweek("1", 0, vec![played("m1", &a, i32::MAX, &b, 0)]),
            matchweek("2", 7, vec![played("m2", &a, 1, &b, 0)]),
        ]);

        let standings = compute_standings(Some(&s)).unwrap();

        let a = row(&standings, "A");
        assert_eq!(a.played_matches, 1);
        assert_eq!((a.goals_for, a.goal_difference), (i32::MAX, i32::MAX));

        let b = row(&standings, "B");
        assert_eq!(b.played_matches, 1);
        assert_eq!(b.goals_against, i32::MAX);

        let scored: i64 = standings.iter().map(|s| i64::from(s.goals_for)).sum();
        let conceded: i64 = standings.iter().map(|s| i64::from(s.goals_against)).sum();
        assert_eq!(scored, conceded);
    }

    #[test]
    fn test_club_playing_itself_is_skipped() {
        let (a, b) = (club(1, "A"), club(2, "B"));
        let s = schedule(vec![matchweek(
            "1",
            0,
            vec![played("m1", &a, 1, &a, 1), played("m2", &a, 2, &b, 0)],
        )]);

        let standings = compute_standings(Some(&s)).unwrap();
        assert_eq!(row(&standings, "A").played_matches, 1);
    }

    fn season_schedule() -> Schedule {
        let clubs: Vec<_> = (0..6).map(|i| club(i + 1, &format!("Club{}", i))).collect();
        let mut fixture = Vec::new();
        let mut n = 0;
        for round in 0..5usize {
            let mut games = Vec::new();
            for i in 0..3 {
                let home = &clubs[(round + i) % 6];
                let away = &clubs[(round + 5 - i) % 6];
                let id = format!("m{}", n);
                n += 1;
                if round == 4 && i == 2 {
                    games.push(unplayed(&id, home, away));
                } else {
                    games.push(played(&id, home, (n % 4) as i32, away, (n % 3) as i32));
                }
            }
            fixture.push(matchweek(&round.to_string(), 7 * round as i64, games));
        }
        schedule(fixture)
    }

    #[test]
    fn test_goals_are_conserved() {
        let standings = compute_standings(Some(&season_schedule())).unwrap();
        let scored: i32 = standings.iter().map(|s| s.goals_for).sum();
        let conceded: i32 = standings.iter().map(|s| s.goals_against).sum();
        assert_eq!(scored, conceded);
    }

    #[test]
    fn test_record_adds_up_to_played_matches() {
        for item in compute_standings(Some(&season_schedule())).unwrap() {
            assert_eq!(item.wins + item.losses + item.draws, item.played_matches);
            assert!(item.latest_games.len() <= FORM_LENGTH);
        }
    }

    #[test]
    fn test_output_is_sorted_and_deterministic() {
        let s = season_schedule();
        let first = compute_standings(Some(&s)).unwrap();
        let second = compute_standings(Some(&s)).unwrap();
        assert_eq!(first, second);

        for pair in first.windows(2) {
            assert_ne!(compare_standings(&pair[0], &pair[1]), Ordering::Greater);
        }
    }
}
