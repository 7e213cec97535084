use sqlx::PgPool;
use storage::{
    dto::standings::StandingsResponse,
    error::Result,
    repository::schedule::ScheduleRepository,
    services::compute_standings,
};
use uuid::Uuid;

/// League table of a competition for a season
pub async fn get_standings(
    pool: &PgPool,
    competition_id: Uuid,
    season: &str,
) -> Result<StandingsResponse> {
    let repo = ScheduleRepository::new(pool);

    let schedule = repo
        .find_by_competition_and_season(competition_id, season)
        .await?;

    let standings = compute_standings(schedule.as_ref())?;

    tracing::debug!(
        %competition_id,
        season,
        clubs = standings.len(),
        "Standings computed"
    );

    Ok(StandingsResponse {
        competition_id,
        season: season.to_string(),
        standings,
    })
}
