use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Club {
    pub club_id: Uuid,
    pub full_name: String,
    pub common_name: String,
    pub short_name: String,
    pub country: String,
    pub logo_url: Option<String>,
    pub stadium: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Club reference embedded in fixture documents.
///
/// Joins always go through `club_id`; the names are display copies taken when
/// the fixture was authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClubSummary {
    pub club_id: Uuid,
    pub full_name: String,
    pub common_name: String,
    pub short_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}
