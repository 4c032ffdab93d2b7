use crate::dtos::{CreatedResponse, ListResponse, WorkListParams};
use crate::middleware::{ValidatedJson, ValidatedQuery};
use crate::models::{CollectionSchema, Work};
use crate::services::{create_document, get_documents, DocumentFilter};
use crate::startup::AppState;
use crate::utils::to_json_records;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Fields matched by the `q` search term.
const SEARCH_FIELDS: [&str; 2] = ["title", "author"];

#[tracing::instrument(skip(state))]
pub async fn list_works(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<WorkListParams>,
) -> Result<Json<ListResponse>, AppError> {
    let store = state.require_store()?;
    let filter = DocumentFilter::search(&SEARCH_FIELDS, params.q.as_deref());
    let documents = get_documents(store, Work::COLLECTION, &filter, params.limit).await?;

    Ok(Json(ListResponse {
        data: to_json_records(documents),
    }))
}

#[tracing::instrument(skip(state, payload), fields(title = %payload.title, author = %payload.author))]
pub async fn create_work(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Work>,
) -> Result<Json<CreatedResponse>, AppError> {
    let store = state.require_store()?;
    let id = create_document(store, Work::COLLECTION, &payload).await?;

    Ok(Json(CreatedResponse {
        id,
        message: "Karya berhasil diunggah".to_string(),
    }))
}
