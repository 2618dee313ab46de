//! Health check endpoint
//!
//! Healthy means the database answers and its schema is at least the version
//! this binary was built for. Anything else is a 500.

use axum::{extract::State, routing::get, Json, Router};
use home_common::db::{schema_version, CURRENT_SCHEMA_VERSION};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub schema_version: i64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let schema_version = schema_version(&state.db).await?;
    if schema_version < CURRENT_SCHEMA_VERSION {
        return Err(ApiError::Internal(format!(
            "database schema is at version {}, expected {} (run `home migrate`)",
            schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(Json(HealthResponse {
        status: "ok",
        module: "home-software",
        version: env!("CARGO_PKG_VERSION"),
        schema_version,
    }))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
