use axum::{Router, routing::get};

use super::handlers::get_standings;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_standings))
}
