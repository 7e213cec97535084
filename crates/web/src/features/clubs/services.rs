use sqlx::PgPool;
use storage::{
    dto::club::{ClubFilter, CreateClubRequest, UpdateClubRequest},
    error::Result,
    models::Club,
    repository::club::ClubRepository,
};
use uuid::Uuid;

/// List clubs with filtering and pagination
pub async fn list_clubs(pool: &PgPool, filter: &ClubFilter) -> Result<(Vec<Club>, i64)> {
    let repo = ClubRepository::new(pool);
    repo.list(filter).await
}

/// Get club by id
pub async fn get_club(pool: &PgPool, id: Uuid) -> Result<Club> {
    let repo = ClubRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new club
pub async fn create_club(pool: &PgPool, request: &CreateClubRequest) -> Result<Club> {
    let repo = ClubRepository::new(pool);
    repo.create(request).await
}

/// Update a club
pub async fn update_club(pool: &PgPool, id: Uuid, request: &UpdateClubRequest) -> Result<Club> {
    let repo = ClubRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a club
pub async fn delete_club(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ClubRepository::new(pool);
    repo.delete(id).await
}
