use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    pub full_name: String,
    pub short_name: String,
    pub country: String,
    pub kind: String,
    pub logo_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
