use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{create_club, delete_club, get_club, list_clubs, update_club};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_club))
        .route("/:id", put(update_club))
        .route("/:id", delete(delete_club))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_clubs))
        .route("/:id", get(get_club))
        .merge(protected)
}
