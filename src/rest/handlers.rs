use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::startup::StartupState;

use super::{models::HealthResponse, AppState};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);

    let status = match state.startup_state {
        StartupState::ServicesRunning => "ok",
        StartupState::StartupFailed => "degraded",
        StartupState::NotStarted | StartupState::SchemaReady => "starting",
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            startup_state: state.startup_state.as_str(),
            uptime_secs,
            schema_version: state.data_access.schema_version().ok(),
        }),
    )
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
