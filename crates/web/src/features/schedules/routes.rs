use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_schedule, current_matchweek, delete_schedule, get_schedule, list_schedules,
    list_schedules_by_club, lookup_schedule, matchweek_window, recent_matches, update_schedule,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_schedule))
        .route("/:id", put(update_schedule))
        .route("/:id", delete(delete_schedule))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_schedules))
        .route("/lookup", get(lookup_schedule))
        .route("/recent", get(recent_matches))
        .route("/by-club/:club_id", get(list_schedules_by_club))
        .route("/:id", get(get_schedule))
        .route("/:id/matchweeks/current", get(current_matchweek))
        .route("/:id/matchweeks/window", get(matchweek_window))
        .merge(protected)
}
