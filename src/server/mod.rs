pub mod cache;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::calendar::TournamentsCalendar;
use crate::tournaments::{Game, TournamentsApi, TracingReporter};
pub use cache::{CachedBatch, TournamentCache};

#[derive(Clone)]
pub struct AppState {
    pub api: TournamentsApi,
    pub cache: TournamentCache,
    pub reporter: Arc<TracingReporter>,
    /// Game served at `/`.
    pub default_game: Game,
}

type ApiError = (StatusCode, String);

/// Build the Axum router for the calendar feed.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/calendar/:game", get(calendar_handler))
        .route("/api/tournaments/:game", get(tournaments_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET / (calendar for the default game)
async fn index_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let batch = load(&state, state.default_game).await?;
    Ok(ics_response(&batch))
}

/// GET /calendar/:game (a trailing `.ics` is accepted)
async fn calendar_handler(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let game = parse_game(&game)?;
    let batch = load(&state, game).await?;
    Ok(ics_response(&batch))
}

/// GET /api/tournaments/:game
async fn tournaments_handler(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let game = parse_game(&game)?;
    let batch = load(&state, game).await?;
    Ok(Json(batch.tournaments.as_ref().clone()))
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "parse_failures": state.reporter.failures(),
        "cached_games": state.cache.len().await,
    }))
}

fn parse_game(raw: &str) -> Result<Game, ApiError> {
    let id = raw.strip_suffix(".ics").unwrap_or(raw);
    id.parse::<Game>()
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}

async fn load(state: &AppState, game: Game) -> Result<CachedBatch, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .get_or_refresh(game, Utc::now(), || async move { api.fetch_all(game).await })
        .await
        .map_err(|e| {
            if e.is_layout_drift() {
                error!("Selectors for {} no longer match the page: {}", game, e);
            } else {
                warn!("Failed to load {} tournaments: {}", game, e);
            }
            (StatusCode::BAD_GATEWAY, e.to_string())
        })
}

fn ics_response(batch: &CachedBatch) -> impl IntoResponse {
    let body = TournamentsCalendar::new(&batch.tournaments).to_ics(batch.fetched_at);
    ([(header::CONTENT_TYPE, "text/calendar; charset=utf-8")], body)
}
