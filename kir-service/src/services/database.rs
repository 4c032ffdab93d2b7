use super::filter::DocumentFilter;
use super::metrics::record_document_created;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, DateTime as BsonDateTime, Document},
    options::FindOptions,
    Client as MongoClient, Database,
};
use serde::Serialize;
use service_core::error::AppError;

/// Driver primitives the service needs from a document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `document` and returns the server-assigned identifier as a string.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, AppError>;

    /// Up to `limit` matching documents in storage order; `limit == 0` means no limit.
    async fn find_many(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Document>, AppError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Serializes `record`, stamps `created_at`/`updated_at`, inserts it, and
/// returns the new identifier.
pub async fn create_document<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> Result<String, AppError> {
    let mut document = bson::to_document(record)?;
    let now = BsonDateTime::now();
    document.insert("created_at", now);
    document.insert("updated_at", now);

    let id = store.insert_one(collection, document).await?;
    record_document_created(collection);
    tracing::info!(collection = %collection, id = %id, "Document created");
    Ok(id)
}

/// Up to `|limit|` matching documents; `limit == 0` returns everything.
pub async fn get_documents(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &DocumentFilter,
    limit: i64,
) -> Result<Vec<Document>, AppError> {
    let limit = limit.saturating_abs();
    let documents = store.find_many(collection, filter, limit).await?;
    tracing::debug!(
        collection = %collection,
        count = documents.len(),
        limit = limit,
        "Documents fetched"
    );
    Ok(documents)
}

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    /// Builds the process-wide client. The driver connects lazily, so an
    /// unreachable server surfaces on first use rather than here.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, AppError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert into {}: {}", collection, e);
                AppError::from(e)
            })?;

        Ok(match result.inserted_id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => result.inserted_id.to_string(),
        })
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let find_options = FindOptions::builder()
            .limit((limit > 0).then_some(limit))
            .build();

        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(filter.to_bson(), find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query {}: {}", collection, e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect {} documents: {}", collection, e);
            AppError::from(e)
        })
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.db.list_collection_names(None).await.map_err(|e| {
            tracing::error!("Failed to list collections: {}", e);
            AppError::from(e)
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
