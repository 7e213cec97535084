use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        club::{ClubFilter, CreateClubRequest, UpdateClubRequest},
        common::PaginatedResponse,
    },
    models::Club,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clubs",
    params(ClubFilter),
    responses(
        (status = 200, description = "Clubs retrieved successfully", body = PaginatedResponse<Club>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "clubs"
)]
pub async fn list_clubs(
    State(db): State<Database>,
    Query(filter): Query<ClubFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (clubs, total_items) = services::list_clubs(db.pool(), &filter).await?;

    Ok(Json(PaginatedResponse::new(clubs, filter.pagination(), total_items)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/{id}",
    params(
        ("id" = Uuid, Path, description = "Club id")
    ),
    responses(
        (status = 200, description = "Club found", body = Club),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn get_club(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let club = services::get_club(db.pool(), id).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Club created successfully", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "clubs"
)]
pub async fn create_club(
    State(db): State<Database>,
    Json(req): Json<CreateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::create_club(db.pool(), &req).await?;
    tracing::info!(club_id = %club.club_id, "Club created");

    Ok((StatusCode::CREATED, Json(club)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{id}",
    params(
        ("id" = Uuid, Path, description = "Club id")
    ),
    request_body = UpdateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club updated successfully", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn update_club(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::update_club(db.pool(), id, &req).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/clubs/{id}",
    params(
        ("id" = Uuid, Path, description = "Club id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Club deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Club still belongs to a competition")
    ),
    tag = "clubs"
)]
pub async fn delete_club(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_club(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
