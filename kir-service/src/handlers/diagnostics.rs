use crate::startup::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Storage connectivity report. Always answers 200; failures are described
/// in the body.
#[tracing::instrument(skip(state))]
pub async fn test_database(State(state): State<AppState>) -> Json<DatabaseDiagnostics> {
    let mut report = DatabaseDiagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_flag(state.config.database.uri.is_some()),
        database_name: set_flag(state.config.database.name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match state.store.as_deref() {
        Some(store) => {
            report.database = "✅ Available".to_string();
            report.connection_status = "Connected".to_string();

            match store.list_collection_names().await {
                Ok(mut names) => {
                    names.truncate(MAX_LISTED_COLLECTIONS);
                    report.collections = names;
                    report.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Database reachable but listing collections failed");
                    report.database =
                        format!("⚠️  Connected but Error: {}", truncate(&fault_text(&e)));
                }
            }
        }
        None => {
            report.database = "⚠️  Available but not initialized".to_string();
        }
    }

    Json(report)
}

fn set_flag(is_set: bool) -> String {
    let label = if is_set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

/// Driver text without the error-kind prefix.
fn fault_text(err: &AppError) -> String {
    match err {
        AppError::DatabaseError(inner) | AppError::InternalError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_CHARS).collect()
}
