use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use storage::Database;
use storage::services::SystemClock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::{clubs, competitions, schedules, standings};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        clubs::handlers::list_clubs,
        clubs::handlers::get_club,
        clubs::handlers::create_club,
        clubs::handlers::update_club,
        clubs::handlers::delete_club,
        competitions::handlers::list_competitions,
        competitions::handlers::get_competition,
        competitions::handlers::create_competition,
        competitions::handlers::update_competition,
        competitions::handlers::delete_competition,
        schedules::handlers::list_schedules,
        schedules::handlers::lookup_schedule,
        schedules::handlers::list_schedules_by_club,
        schedules::handlers::recent_matches,
        schedules::handlers::get_schedule,
        schedules::handlers::current_matchweek,
        schedules::handlers::matchweek_window,
        schedules::handlers::create_schedule,
        schedules::handlers::update_schedule,
        schedules::handlers::delete_schedule,
        standings::handlers::get_standings,
    ),
    components(
        schemas(
            storage::dto::club::CreateClubRequest,
            storage::dto::club::UpdateClubRequest,
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::UpdateCompetitionRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::competition::CompetitionInfo,
            storage::dto::schedule::CreateScheduleRequest,
            storage::dto::schedule::UpdateScheduleRequest,
            storage::dto::schedule::ScheduleSortBy,
            storage::dto::schedule::RecentMatchesEntry,
            storage::dto::schedule::MatchweekWindowResponse,
            storage::dto::standings::StandingItem,
            storage::dto::standings::StandingsResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::common::SortOrder,
            storage::models::Club,
            storage::models::ClubSummary,
            storage::models::Competition,
            storage::models::Schedule,
            storage::models::Matchweek,
            storage::models::Match,
            storage::models::MatchSide,
            storage::models::MatchResult,
        )
    ),
    tags(
        (name = "clubs", description = "Club reference data"),
        (name = "competitions", description = "Competitions and their clubs"),
        (name = "schedules", description = "Season fixtures, matchweeks and recent results"),
        (name = "standings", description = "League tables computed from schedules"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Matchday API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        window_size = config.matchweek_window_size,
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let state = AppState {
        db,
        clock: Arc::new(SystemClock),
        window_size: config.matchweek_window_size,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let app = Router::new()
        .nest("/api/clubs", clubs::routes::routes(api_keys.clone()))
        .nest(
            "/api/competitions",
            competitions::routes::routes(api_keys.clone()),
        )
        .nest("/api/schedules", schedules::routes::routes(api_keys))
        .nest("/api/standings", standings::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
