use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::standings::{StandingsQuery, StandingsResponse};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/standings",
    params(StandingsQuery),
    responses(
        (status = 200, description = "League table, best placed club first", body = StandingsResponse),
        (status = 404, description = "No schedule for this competition and season")
    ),
    tag = "standings"
)]
pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> Result<Response, WebError> {
    let season = query
        .season
        .unwrap_or_else(|| state.clock.current_season());

    let standings = services::get_standings(state.db.pool(), query.competition_id, &season).await?;

    Ok(Json(standings).into_response())
}
