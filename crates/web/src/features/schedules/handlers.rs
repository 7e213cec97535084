use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        schedule::{
            CreateScheduleRequest, MatchweekWindowQuery, MatchweekWindowResponse,
            RecentMatchesEntry, RecentMatchesQuery, ScheduleFilter, ScheduleLookupQuery,
            UpdateScheduleRequest,
        },
    },
    models::{Matchweek, Schedule},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/schedules",
    params(ScheduleFilter),
    responses(
        (status = 200, description = "Schedules retrieved successfully", body = PaginatedResponse<Schedule>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "schedules"
)]
pub async fn list_schedules(
    State(db): State<Database>,
    Query(filter): Query<ScheduleFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (schedules, total_items) = services::list_schedules(db.pool(), &filter).await?;

    Ok(Json(PaginatedResponse::new(schedules, filter.pagination(), total_items)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/lookup",
    params(ScheduleLookupQuery),
    responses(
        (status = 200, description = "Schedule of the competition for the season", body = Schedule),
        (status = 404, description = "No schedule for this competition and season")
    ),
    tag = "schedules"
)]
pub async fn lookup_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleLookupQuery>,
) -> Result<Response, WebError> {
    let season = query
        .season
        .unwrap_or_else(|| state.clock.current_season());

    let schedule = services::find_schedule(state.db.pool(), query.competition_id, &season).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/by-club/{club_id}",
    params(
        ("club_id" = Uuid, Path, description = "Club id")
    ),
    responses(
        (status = 200, description = "Schedules of the club's competitions", body = Vec<Schedule>),
        (status = 404, description = "Club not found")
    ),
    tag = "schedules"
)]
pub async fn list_schedules_by_club(
    State(db): State<Database>,
    Path(club_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let schedules = services::list_schedules_by_club(db.pool(), club_id).await?;

    Ok(Json(schedules).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/recent",
    params(RecentMatchesQuery),
    responses(
        (status = 200, description = "Latest played matches per competition", body = Vec<RecentMatchesEntry>)
    ),
    tag = "schedules"
)]
pub async fn recent_matches(
    State(state): State<AppState>,
    Query(query): Query<RecentMatchesQuery>,
) -> Result<Response, WebError> {
    let season = query
        .season
        .unwrap_or_else(|| state.clock.current_season());

    let recent = services::recent_matches(state.db.pool(), &season).await?;

    Ok(Json(recent).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule id")
    ),
    responses(
        (status = 200, description = "Schedule found", body = Schedule),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn get_schedule(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let schedule = services::get_schedule(db.pool(), id).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}/matchweeks/current",
    params(
        ("id" = Uuid, Path, description = "Schedule id")
    ),
    responses(
        (status = 200, description = "Matchweek closest to today", body = Matchweek),
        (status = 404, description = "Schedule not found or without matchweeks")
    ),
    tag = "schedules"
)]
pub async fn current_matchweek(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let matchweek = services::current_matchweek(state.db.pool(), id, state.clock.as_ref()).await?;

    Ok(Json(matchweek).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}/matchweeks/window",
    params(
        ("id" = Uuid, Path, description = "Schedule id"),
        MatchweekWindowQuery
    ),
    responses(
        (status = 200, description = "Consecutive matchweeks around the anchor", body = MatchweekWindowResponse),
        (status = 400, description = "Invalid window size"),
        (status = 404, description = "Schedule or anchor matchweek not found")
    ),
    tag = "schedules"
)]
pub async fn matchweek_window(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MatchweekWindowQuery>,
) -> Result<Response, WebError> {
    let size = services::resolve_window_size(query.size, state.window_size)
        .map_err(WebError::BadRequest)?;

    let window = services::matchweek_window(
        state.db.pool(),
        id,
        query.matchweek_id.as_deref(),
        size,
        state.clock.as_ref(),
    )
    .await?;

    Ok(Json(window).into_response())
}

#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Schedule created successfully", body = Schedule),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Schedule already exists for this competition and season")
    ),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(db): State<Database>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_fixture().map_err(WebError::BadRequest)?;

    let schedule = services::create_schedule(db.pool(), &req).await?;
    tracing::info!(
        schedule_id = %schedule.schedule_id,
        competition_id = %schedule.competition_id,
        season = %schedule.season,
        matchweeks = schedule.matchweeks().len(),
        "Schedule created"
    );

    Ok((StatusCode::CREATED, Json(schedule)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule id")
    ),
    request_body = UpdateScheduleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Schedule updated successfully", body = Schedule),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found"),
        (status = 409, description = "Schedule already exists for this competition and season")
    ),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_fixture().map_err(WebError::BadRequest)?;

    let schedule = services::update_schedule(db.pool(), id, &req).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Schedule deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_schedule(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
