use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        competition::CompetitionInfo,
        schedule::{
            CreateScheduleRequest, MatchweekWindowResponse, RecentMatchesEntry, ScheduleFilter,
            UpdateScheduleRequest,
        },
    },
    error::{Result, ScheduleError},
    models::{Matchweek, Schedule},
    repository::{
        club::ClubRepository, competition::CompetitionRepository, schedule::ScheduleRepository,
    },
    services::{Clock, latest_played_matches, select_current_matchweek, select_window},
};
use uuid::Uuid;

use crate::config::MAX_WINDOW_SIZE;

/// List schedules with filtering, sorting and pagination
pub async fn list_schedules(pool: &PgPool, filter: &ScheduleFilter) -> Result<(Vec<Schedule>, i64)> {
    let repo = ScheduleRepository::new(pool);
    repo.list(filter).await
}

/// Get schedule by id
pub async fn get_schedule(pool: &PgPool, id: Uuid) -> Result<Schedule> {
    let repo = ScheduleRepository::new(pool);
    repo.find_by_id(id).await
}

/// Schedule of a competition for a season
pub async fn find_schedule(pool: &PgPool, competition_id: Uuid, season: &str) -> Result<Schedule> {
    let repo = ScheduleRepository::new(pool);

    repo.find_by_competition_and_season(competition_id, season)
        .await?
        .ok_or_else(|| ScheduleError::MissingSchedule.into())
}

/// Schedules of every competition a club plays in
pub async fn list_schedules_by_club(pool: &PgPool, club_id: Uuid) -> Result<Vec<Schedule>> {
    ClubRepository::new(pool).find_by_id(club_id).await?;

    let repo = ScheduleRepository::new(pool);
    repo.list_by_club(club_id).await
}

/// Latest played round of every competition in a season
pub async fn recent_matches(pool: &PgPool, season: &str) -> Result<Vec<RecentMatchesEntry>> {
    let schedules = ScheduleRepository::new(pool).list_by_season(season).await?;
    let recent = latest_played_matches(&schedules);

    if recent.is_empty() {
        return Ok(Vec::new());
    }

    let competition_ids: Vec<Uuid> = recent.iter().map(|r| r.competition_id).collect();
    let competitions: HashMap<Uuid, CompetitionInfo> = CompetitionRepository::new(pool)
        .find_many(&competition_ids)
        .await?
        .iter()
        .map(|c| (c.competition_id, CompetitionInfo::from(c)))
        .collect();

    let entries = recent
        .into_iter()
        .filter_map(|r| {
            let competition = competitions.get(&r.competition_id)?.clone();
            Some(RecentMatchesEntry {
                competition,
                season: r.season,
                matchweek_id: r.matchweek_id,
                matchweek_name: r.matchweek_name,
                matches: r.matches,
            })
        })
        .collect();

    Ok(entries)
}

/// Create a new schedule
pub async fn create_schedule(pool: &PgPool, request: &CreateScheduleRequest) -> Result<Schedule> {
    let repo = ScheduleRepository::new(pool);
    repo.create(request).await
}

/// Update a schedule
pub async fn update_schedule(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateScheduleRequest,
) -> Result<Schedule> {
    let repo = ScheduleRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a schedule
pub async fn delete_schedule(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ScheduleRepository::new(pool);
    repo.delete(id).await
}

/// Matchweek of a schedule closest to now
pub async fn current_matchweek(pool: &PgPool, id: Uuid, clock: &dyn Clock) -> Result<Matchweek> {
    let schedule = get_schedule(pool, id).await?;
    let matchweek = select_current_matchweek(schedule.matchweeks(), clock)?;

    Ok(matchweek.clone())
}

/// Matchweek window of a schedule
pub async fn matchweek_window(
    pool: &PgPool,
    id: Uuid,
    anchor_id: Option<&str>,
    size: usize,
    clock: &dyn Clock,
) -> Result<MatchweekWindowResponse> {
    let schedule = get_schedule(pool, id).await?;

    Ok(build_window(&schedule, anchor_id, size, clock)?)
}

/// Window around `anchor_id`, or around the current matchweek when no anchor is given.
pub fn build_window(
    schedule: &Schedule,
    anchor_id: Option<&str>,
    size: usize,
    clock: &dyn Clock,
) -> std::result::Result<MatchweekWindowResponse, ScheduleError> {
    let matchweeks = schedule.matchweeks();

    let anchor_id = match anchor_id {
        Some(id) => id.to_string(),
        None => select_current_matchweek(matchweeks, clock)?.id.clone(),
    };

    let window = select_window(matchweeks, &anchor_id, size)?;

    Ok(MatchweekWindowResponse {
        schedule_id: schedule.schedule_id,
        anchor_id,
        matchweeks: window.to_vec(),
    })
}

/// Requested window size, falling back to the configured default
pub fn resolve_window_size(
    requested: Option<usize>,
    default: usize,
) -> std::result::Result<usize, String> {
    let size = requested.unwrap_or(default);

    if (1..=MAX_WINDOW_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("size must be between 1 and {}", MAX_WINDOW_SIZE))
    }
}
