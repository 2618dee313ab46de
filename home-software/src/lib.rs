//! home-software library - household routines and recipe suggestions
//!
//! Cleaning routines are grouped by room and flagged due relative to the end
//! of the current week; recipes are drawn at random with a two-week
//! anti-repetition window. Exposed through the `home` CLI and a small web
//! view.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cleaning;
pub mod cli;
pub mod db;
pub mod error;
pub mod recipes;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::response::Redirect;
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(|| async { Redirect::to("/cleaning/") }))
        .route("/cleaning/", get(api::cleaning_page))
        .route("/cleaning/record", post(api::record_routines))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
