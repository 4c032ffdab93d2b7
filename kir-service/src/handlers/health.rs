use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Pings the store when one is configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(store) = state.store.as_deref() else {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": state.config.service_name,
                "version": env!("CARGO_PKG_VERSION"),
                "database": "not configured"
            })),
        );
    };

    match store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": state.config.service_name,
                "version": env!("CARGO_PKG_VERSION"),
                "database": "up"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": state.config.service_name,
                "error": e.to_string()
            })),
        ),
    }
}

/// Readiness probe: ready only when a store is configured and answers.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(store) = state.store.as_deref() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match store.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
