//! Fixture builders shared by the service tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{ClubSummary, Match, MatchResult, MatchSide, Matchweek, Schedule};

pub fn club(n: u128, name: &str) -> ClubSummary {
    ClubSummary {
        club_id: Uuid::from_u128(n),
        full_name: format!("{} FC", name),
        common_name: name.to_string(),
        short_name: name.chars().take(3).collect::<String>().to_uppercase(),
        logo_url: None,
    }
}

pub fn kickoff(day: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 12, 15, 0, 0).unwrap() + Duration::days(day)
}

fn side(club: &ClubSummary, scored: i32, conceded: i32, result: Option<MatchResult>) -> MatchSide {
    let points = result.map(|r| match r {
        MatchResult::Win => 3,
        MatchResult::Draw => 1,
        MatchResult::Loss => 0,
    });

    MatchSide {
        club: club.clone(),
        points,
        goals_for: result.map(|_| scored),
        goals_against: result.map(|_| conceded),
        result,
    }
}

/// Played match with 3/1/0 points derived from the score.
pub fn played(id: &str, home: &ClubSummary, home_goals: i32, away: &ClubSummary, away_goals: i32) -> Match {
    let home_result = match home_goals.cmp(&away_goals) {
        std::cmp::Ordering::Greater => MatchResult::Win,
        std::cmp::Ordering::Less => MatchResult::Loss,
        std::cmp::Ordering::Equal => MatchResult::Draw,
    };

    Match {
        id: id.to_string(),
        home: side(home, home_goals, away_goals, Some(home_result)),
        away: side(away, away_goals, home_goals, Some(home_result.opposite())),
        date: kickoff(0),
        location: None,
        score: Some(format!("{}:{}", home_goals, away_goals)),
    }
}

pub fn unplayed(id: &str, home: &ClubSummary, away: &ClubSummary) -> Match {
    Match {
        id: id.to_string(),
        home: side(home, 0, 0, None),
        away: side(away, 0, 0, None),
        date: kickoff(0),
        location: Some("TBD".to_string()),
        score: None,
    }
}

pub fn matchweek(id: &str, day: i64, matches: Vec<Match>) -> Matchweek {
    Matchweek {
        id: id.to_string(),
        name: format!("Matchweek {}", id),
        reference_date: kickoff(day),
        matches,
    }
}

/// `count` empty matchweeks one week apart, with ids "mw0", "mw1", ...
pub fn weekly_matchweeks(count: usize) -> Vec<Matchweek> {
    (0..count)
        .map(|i| matchweek(&format!("mw{}", i), 7 * i as i64, Vec::new()))
        .collect()
}

pub fn schedule(fixture: Vec<Matchweek>) -> Schedule {
    Schedule {
        schedule_id: Uuid::from_u128(1),
        competition_id: Uuid::from_u128(100),
        season: "2023/24".to_string(),
        fixture: Json(fixture),
        created_at: kickoff(-30).naive_utc(),
    }
}
