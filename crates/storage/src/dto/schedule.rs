use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationParams, SortOrder, default_page, default_page_size};
use super::competition::CompetitionInfo;
use crate::models::{Match, Matchweek};

/// Request payload for creating a schedule
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleRequest {
    pub competition_id: Uuid,

    #[validate(custom(function = "validate_season"))]
    pub season: String,

    #[serde(default)]
    pub fixture: Vec<Matchweek>,
}

/// Request payload for updating a schedule
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleRequest {
    pub competition_id: Option<Uuid>,

    #[validate(custom(function = "validate_season"))]
    pub season: Option<String>,

    pub fixture: Option<Vec<Matchweek>>,
}

impl CreateScheduleRequest {
    /// Structural checks on the fixture that need more than one field
    pub fn validate_fixture(&self) -> Result<(), String> {
        validate_fixture(&self.fixture)
    }
}

impl UpdateScheduleRequest {
    pub fn validate_fixture(&self) -> Result<(), String> {
        match &self.fixture {
            Some(fixture) => validate_fixture(fixture),
            None => Ok(()),
        }
    }
}

fn validate_season(season: &str) -> Result<(), validator::ValidationError> {
    let valid = season
        .split_once('/')
        .and_then(|(start, end)| {
            if start.len() != 4 || end.len() != 2 {
                return None;
            }
            let start: i32 = start.parse().ok()?;
            let end: i32 = end.parse().ok()?;
            Some((start + 1).rem_euclid(100) == end)
        })
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_season"))
    }
}

/// Most goals one side may record in a single match.
pub const MAX_GOALS: i32 = 99;

/// Most points one side may earn from a single match, bonus points included.
pub const MAX_MATCH_POINTS: i32 = 10;

/// Rejects fixtures that would make standings or matchweek lookups ambiguous.
pub fn validate_fixture(fixture: &[Matchweek]) -> Result<(), String> {
    let mut matchweek_ids = HashSet::new();
    let mut match_ids = HashSet::new();

    for mw in fixture {
        if mw.id.trim().is_empty() {
            return Err("Matchweek id must not be empty".to_string());
        }
        if !matchweek_ids.insert(mw.id.as_str()) {
            return Err(format!("Duplicate matchweek id: {}", mw.id));
        }

        for game in &mw.matches {
            if !match_ids.insert(game.id.as_str()) {
                return Err(format!("Duplicate match id: {}", game.id));
            }
            validate_match(game)?;
        }
    }

    Ok(())
}

fn validate_match(game: &Match) -> Result<(), String> {
    if game.home.club.club_id == game.away.club.club_id {
        return Err(format!("Match {}: a club cannot play itself", game.id));
    }

    let goals = [
        game.home.goals_for,
        game.home.goals_against,
        game.away.goals_for,
        game.away.goals_against,
    ];
    if goals.iter().flatten().any(|g| *g < 0) {
        return Err(format!("Match {}: goals must not be negative", game.id));
    }
    if goals.iter().flatten().any(|g| *g > MAX_GOALS) {
        return Err(format!(
            "Match {}: goals must not exceed {}",
            game.id, MAX_GOALS
        ));
    }

    let points = [game.home.points, game.away.points];
    if points
        .iter()
        .flatten()
        .any(|p| !(0..=MAX_MATCH_POINTS).contains(p))
    {
        return Err(format!(
            "Match {}: points must be between 0 and {}",
            game.id, MAX_MATCH_POINTS
        ));
    }

    game.validate_result().map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSortBy {
    #[default]
    CreatedAt,
    Season,
}

impl ScheduleSortBy {
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "s.created_at",
            Self::Season => "s.season",
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ScheduleFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub competition_id: Option<Uuid>,
    pub country: Option<String>,
    pub season: Option<String>,
    /// Lower bound (inclusive) on the creation date
    pub date_from: Option<NaiveDate>,
    /// Upper bound (inclusive) on the creation date
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub sort_by: ScheduleSortBy,
    #[serde(default)]
    pub order: SortOrder,
}

impl ScheduleFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && to < from
        {
            return Err("date_to must be on or after date_from".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ScheduleLookupQuery {
    pub competition_id: Uuid,
    /// Defaults to the current season
    pub season: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentMatchesQuery {
    /// Defaults to the current season
    pub season: Option<String>,
}

/// Latest played round of one competition
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentMatchesEntry {
    pub competition: CompetitionInfo,
    pub season: String,
    pub matchweek_id: String,
    pub matchweek_name: String,
    pub matches: Vec<Match>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MatchweekWindowQuery {
    /// Anchor matchweek; the current matchweek when omitted
    pub matchweek_id: Option<String>,
    /// Number of matchweeks to return
    pub size: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MatchweekWindowResponse {
    pub schedule_id: Uuid,
    pub anchor_id: String,
    pub matchweeks: Vec<Matchweek>,
}
