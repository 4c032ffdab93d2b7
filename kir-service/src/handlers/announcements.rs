use crate::dtos::{AnnouncementListParams, CreatedResponse, ListResponse};
use crate::middleware::{ValidatedJson, ValidatedQuery};
use crate::models::{Announcement, CollectionSchema};
use crate::services::{create_document, get_documents, DocumentFilter};
use crate::startup::AppState;
use crate::utils::to_json_records;
use axum::{extract::State, Json};
use service_core::error::AppError;

#[tracing::instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<AnnouncementListParams>,
) -> Result<Json<ListResponse>, AppError> {
    let store = state.require_store()?;
    let documents = get_documents(
        store,
        Announcement::COLLECTION,
        &DocumentFilter::All,
        params.limit,
    )
    .await?;

    Ok(Json(ListResponse {
        data: to_json_records(documents),
    }))
}

#[tracing::instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_announcement(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Announcement>,
) -> Result<Json<CreatedResponse>, AppError> {
    let store = state.require_store()?;
    let id = create_document(store, Announcement::COLLECTION, &payload).await?;

    Ok(Json(CreatedResponse {
        id,
        message: "Pengumuman dibuat".to_string(),
    }))
}
