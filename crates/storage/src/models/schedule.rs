use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::club::ClubSummary;
use crate::error::ScheduleError;

/// Outcome of a match from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
}

impl MatchResult {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Win => "W",
            Self::Loss => "L",
            Self::Draw => "D",
        }
    }

    /// The result the opposing side must have recorded.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Win => Self::Loss,
            Self::Loss => Self::Win,
            Self::Draw => Self::Draw,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for MatchResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" => Ok(Self::Win),
            "L" => Ok(Self::Loss),
            "D" => Ok(Self::Draw),
            other => Err(format!("unknown match result code '{}'", other)),
        }
    }
}

// Fixture documents written by older clients store "" for matches not yet played.
fn empty_result_as_none<'de, D>(deserializer: D) -> Result<Option<MatchResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => code.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchSide {
    pub club: ClubSummary,
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(default)]
    pub goals_for: Option<i32>,
    #[serde(default)]
    pub goals_against: Option<i32>,
    #[serde(default, deserialize_with = "empty_result_as_none")]
    pub result: Option<MatchResult>,
}

impl MatchSide {
    pub fn points(&self) -> i32 {
        self.points.unwrap_or(0)
    }

    pub fn goals_for(&self) -> i32 {
        self.goals_for.unwrap_or(0)
    }

    pub fn goals_against(&self) -> i32 {
        self.goals_against.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Match {
    pub id: String,
    pub home: MatchSide,
    pub away: MatchSide,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
}

impl Match {
    /// A match counts as played once a result is recorded for it.
    pub fn is_played(&self) -> bool {
        self.home.result.is_some() || self.away.result.is_some()
    }

    /// Checks that the recorded result is internally consistent.
    ///
    /// Unplayed matches are always valid. Goal counts are compared only when
    /// both mirrored values are present.
    pub fn validate_result(&self) -> Result<(), ScheduleError> {
        let invalid = |reason: String| ScheduleError::InvalidMatchResult {
            match_id: self.id.clone(),
            reason,
        };

        let (home, away) = match (self.home.result, self.away.result) {
            (None, None) => return Ok(()),
            (Some(home), Some(away)) => (home, away),
            _ => return Err(invalid("result recorded for one side only".to_string())),
        };

        if home.opposite() != away {
            return Err(invalid(format!(
                "results {} and {} are not complementary",
                home, away
            )));
        }

        if let (Some(scored), Some(conceded)) = (self.home.goals_for, self.away.goals_against)
            && scored != conceded
        {
            return Err(invalid(format!(
                "home goals for ({}) differ from away goals against ({})",
                scored, conceded
            )));
        }

        if let (Some(scored), Some(conceded)) = (self.away.goals_for, self.home.goals_against)
            && scored != conceded
        {
            return Err(invalid(format!(
                "away goals for ({}) differ from home goals against ({})",
                scored, conceded
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Matchweek {
    pub id: String,
    pub name: String,
    /// Representative date of the round, used to find the matchweek nearest to today.
    pub reference_date: DateTime<Utc>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Matchweek {
    pub fn has_played_matches(&self) -> bool {
        self.matches.iter().any(Match::is_played)
    }
}

/// A competition's fixture list for one season.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub schedule_id: Uuid,
    pub competition_id: Uuid,
    pub season: String,
    #[schema(value_type = Vec<Matchweek>)]
    pub fixture: Json<Vec<Matchweek>>,
    pub created_at: chrono::NaiveDateTime,
}

impl Schedule {
    pub fn matchweeks(&self) -> &[Matchweek] {
        &self.fixture.0
    }

    /// All matches of the season in fixture order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.fixture.0.iter().flat_map(|mw| mw.matches.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn side(result: Option<MatchResult>, goals_for: i32, goals_against: i32) -> MatchSide {
        MatchSide {
            club: ClubSummary {
                club_id: Uuid::new_v4(),
                full_name: "Club".to_string(),
                common_name: "Club".to_string(),
                short_name: "CLB".to_string(),
                logo_url: None,
            },
            points: None,
            goals_for: Some(goals_for),
            goals_against: Some(goals_against),
            result,
        }
    }

    fn game(home: MatchSide, away: MatchSide) -> Match {
        Match {
            id: "m1".to_string(),
            home,
            away,
            date: Utc::now(),
            location: None,
            score: None,
        }
    }

    #[test]
    fn test_result_codes_parse() {
        assert_eq!("W".parse::<MatchResult>(), Ok(MatchResult::Win));
        assert_eq!(" d ".parse::<MatchResult>(), Ok(MatchResult::Draw));
        assert!("X".parse::<MatchResult>().is_err());
    }

    #[test]
    fn test_empty_result_deserializes_as_unplayed() {
        let value = json!({
            "club": {
                "club_id": Uuid::nil(),
                "full_name": "Arsenal FC",
                "common_name": "Arsenal",
                "short_name": "ARS"
            },
            "result": ""
        });

        let side: MatchSide = serde_json::from_value(value).unwrap();
        assert_eq!(side.result, None);
        assert_eq!(side.points(), 0);
        assert_eq!(side.goals_for(), 0);
    }

    #[test]
    fn test_result_serializes_as_code() {
        let value = serde_json::to_value(MatchResult::Loss).unwrap();
        assert_eq!(value, json!("L"));
    }

    #[test]
    fn test_validate_result_accepts_consistent_match() {
        let m = game(
            side(Some(MatchResult::Win), 2, 0),
            side(Some(MatchResult::Loss), 0, 2),
        );
        assert!(m.is_played());
        assert!(m.validate_result().is_ok());
    }

    #[test]
    fn test_validate_result_accepts_unplayed_match() {
        let m = game(side(None, 0, 0), side(None, 0, 0));
        assert!(!m.is_played());
        assert!(m.validate_result().is_ok());
    }

    #[test]
    fn test_validate_result_rejects_two_winners() {
        let m = game(
            side(Some(MatchResult::Win), 1, 1),
            side(Some(MatchResult::Win), 1, 1),
        );
        assert!(matches!(
            m.validate_result(),
            Err(ScheduleError::InvalidMatchResult { .. })
        ));
    }

    #[test]
    fn test_validate_result_rejects_one_sided_result() {
        let m = game(side(Some(MatchResult::Draw), 1, 1), side(None, 1, 1));
        assert!(m.is_played());
        assert!(m.validate_result().is_err());
    }

    #[test]
    fn test_validate_result_rejects_mismatched_goals() {
        let m = game(
            side(Some(MatchResult::Win), 3, 0),
            side(Some(MatchResult::Loss), 0, 2),
        );
        let err = m.validate_result().unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidMatchResult {
                match_id: "m1".to_string(),
                reason: "home goals for (3) differ from away goals against (2)".to_string(),
            }
        );
    }
}
