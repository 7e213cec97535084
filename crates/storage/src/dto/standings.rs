use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{ClubSummary, MatchResult};

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StandingItem {
    pub club: ClubSummary,
    pub played_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
    /// Most recent results, oldest first.
    pub latest_games: Vec<MatchResult>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StandingsQuery {
    pub competition_id: Uuid,
    /// Defaults to the current season
    pub season: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StandingsResponse {
    pub competition_id: Uuid,
    pub season: String,
    pub standings: Vec<StandingItem>,
}
