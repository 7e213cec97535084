use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Club, Competition};

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Competition must have a name"
    ))]
    pub full_name: String,

    #[validate(length(min = 1, max = 20))]
    pub short_name: String,

    #[validate(length(min = 1, max = 100))]
    pub country: String,

    #[validate(custom(function = "validate_kind"))]
    #[serde(default = "default_kind")]
    pub kind: String,

    #[validate(url)]
    pub logo_url: Option<String>,

    #[validate(length(min = 2, message = "Competition must have at least two clubs"))]
    #[validate(custom(function = "validate_unique_clubs"))]
    pub clubs: Vec<Uuid>,
}

/// Request payload for updating an existing competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = 255, message = "Competition must have a name"))]
    pub full_name: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub short_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,

    #[validate(custom(function = "validate_kind"))]
    pub kind: Option<String>,

    #[validate(url)]
    pub logo_url: Option<String>,

    #[validate(length(min = 2, message = "Competition must have at least two clubs"))]
    #[validate(custom(function = "validate_unique_clubs"))]
    pub clubs: Option<Vec<Uuid>>,
}

/// Competition with its member clubs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub competition_id: Uuid,
    pub full_name: String,
    pub short_name: String,
    pub country: String,
    pub kind: String,
    pub logo_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub clubs: Vec<Club>,
}

impl CompetitionResponse {
    pub fn new(competition: Competition, clubs: Vec<Club>) -> Self {
        Self {
            competition_id: competition.competition_id,
            full_name: competition.full_name,
            short_name: competition.short_name,
            country: competition.country,
            kind: competition.kind,
            logo_url: competition.logo_url,
            created_at: competition.created_at,
            clubs,
        }
    }
}

/// Competition reference attached to derived views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionInfo {
    pub competition_id: Uuid,
    pub full_name: String,
    pub short_name: String,
    pub logo_url: Option<String>,
}

impl From<&Competition> for CompetitionInfo {
    fn from(comp: &Competition) -> Self {
        Self {
            competition_id: comp.competition_id,
            full_name: comp.full_name.clone(),
            short_name: comp.short_name.clone(),
            logo_url: comp.logo_url.clone(),
        }
    }
}

fn default_kind() -> String {
    "league".to_string()
}

fn validate_kind(kind: &str) -> Result<(), validator::ValidationError> {
    const VALID_KINDS: &[&str] = &["league", "cup"];

    if VALID_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_kind"))
    }
}

fn validate_unique_clubs(clubs: &[Uuid]) -> Result<(), validator::ValidationError> {
    let mut seen = std::collections::HashSet::new();

    if clubs.iter().all(|id| seen.insert(id)) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("duplicate_club"))
    }
}
