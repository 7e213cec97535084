use sqlx::PgPool;
use storage::{
    dto::competition::{CompetitionResponse, CreateCompetitionRequest, UpdateCompetitionRequest},
    error::{Result, StorageError},
    repository::{club::ClubRepository, competition::CompetitionRepository},
};
use uuid::Uuid;

/// List all competitions with their clubs
pub async fn list_competitions(pool: &PgPool) -> Result<Vec<CompetitionResponse>> {
    let repo = CompetitionRepository::new(pool);

    let competitions = repo.list().await?;
    let mut response = Vec::with_capacity(competitions.len());

    for competition in competitions {
        let clubs = repo.clubs(competition.competition_id).await?;
        response.push(CompetitionResponse::new(competition, clubs));
    }

    Ok(response)
}

/// Get competition by id, with its clubs
pub async fn get_competition(pool: &PgPool, id: Uuid) -> Result<CompetitionResponse> {
    let repo = CompetitionRepository::new(pool);

    let competition = repo.find_by_id(id).await?;
    let clubs = repo.clubs(id).await?;

    Ok(CompetitionResponse::new(competition, clubs))
}

/// Create a new competition
pub async fn create_competition(
    pool: &PgPool,
    request: &CreateCompetitionRequest,
) -> Result<CompetitionResponse> {
    ensure_clubs_exist(pool, &request.clubs).await?;

    let repo = CompetitionRepository::new(pool);
    let competition = repo.create(request).await?;
    let clubs = repo.clubs(competition.competition_id).await?;

    Ok(CompetitionResponse::new(competition, clubs))
}

/// Update a competition
pub async fn update_competition(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateCompetitionRequest,
) -> Result<CompetitionResponse> {
    if let Some(clubs) = &request.clubs {
        ensure_clubs_exist(pool, clubs).await?;
    }

    let repo = CompetitionRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    let competition = repo.update(&existing, request).await?;
    let clubs = repo.clubs(id).await?;

    Ok(CompetitionResponse::new(competition, clubs))
}

/// Delete a competition
pub async fn delete_competition(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = CompetitionRepository::new(pool);
    repo.delete(id).await
}

async fn ensure_clubs_exist(pool: &PgPool, ids: &[Uuid]) -> Result<()> {
    let found = ClubRepository::new(pool).find_many(ids).await?;

    if let Some(missing) = ids
        .iter()
        .find(|id| !found.iter().any(|club| club.club_id == **id))
    {
        return Err(StorageError::ConstraintViolation(format!(
            "Club {} does not exist",
            missing
        )));
    }

    Ok(())
}
