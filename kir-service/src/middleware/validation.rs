//! Extractors that run schema validation before a handler sees the payload.
//!
//! Every input problem surfaces as 422: unparseable JSON, missing required
//! fields, wrong primitive types and `validator` constraint failures alike.
//! A rejected request never reaches the data layer.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

/// JSON body extractor. The body is parsed as JSON whatever the
/// `Content-Type` says, so clients that omit the header still work.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "Failed to read request body");
            AppError::UnprocessableEntity(anyhow::anyhow!(e.body_text()))
        })?;

        let value: T = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(error = %e, "Rejected JSON payload");
            AppError::UnprocessableEntity(anyhow::anyhow!(e))
        })?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        value.validate()?;
        Ok(Self(value))
    }
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::UnprocessableEntity(anyhow::anyhow!(rejection.body_text()))
}
