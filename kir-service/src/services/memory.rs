use super::database::DocumentStore;
use super::filter::DocumentFilter;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Process-local store backing the test suites in place of MongoDB.
/// Collections keep insertion order, which stands in for storage order.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored in `collection`.
    pub fn count(&self, collection: &str) -> Result<usize, AppError> {
        let collections = self.lock()?;
        Ok(collections.get(collection).map(Vec::len).unwrap_or(0))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Document>>>, AppError> {
        self.collections
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, AppError> {
        let id = ObjectId::new();

        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(id.to_hex())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.lock()?;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let take = if limit > 0 { limit as usize } else { usize::MAX };
        Ok(documents
            .iter()
            .filter(|document| filter.matches(document))
            .take(take)
            .cloned()
            .collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
