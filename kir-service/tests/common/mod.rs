//! Shared helpers for kir-service integration tests.
//!
//! Each test gets its own server on a random port, backed by a fresh
//! in-memory store unless the test supplies its own.

#![allow(dead_code)]

use async_trait::async_trait;
use kir_service::config::{DatabaseConfig, KirConfig};
use kir_service::services::{DocumentFilter, DocumentStore, InMemoryStore};
use kir_service::startup::Application;
use mongodb::bson::Document;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub memory: Option<Arc<InMemoryStore>>,
}

pub fn test_config(database_configured: bool) -> KirConfig {
    let database = if database_configured {
        DatabaseConfig {
            uri: Some("mongodb://localhost:27017".to_string()),
            name: Some("kir_test".to_string()),
        }
    } else {
        DatabaseConfig::default()
    };

    KirConfig {
        common: CoreConfig { port: 0 },
        service_name: "kir-service".to_string(),
        log_level: "info".to_string(),
        otlp_endpoint: None,
        allowed_origins: vec!["*".to_string()],
        database,
    }
}

impl TestApp {
    /// Server backed by an empty in-memory store.
    pub async fn spawn() -> Self {
        let memory = Arc::new(InMemoryStore::new());
        let store: Arc<dyn DocumentStore> = memory.clone();
        let mut app = Self::spawn_with(test_config(true), Some(store)).await;
        app.memory = Some(memory);
        app
    }

    /// Server started without any database configured.
    pub async fn spawn_without_store() -> Self {
        Self::spawn_with(test_config(false), None).await
    }

    pub async fn spawn_with(config: KirConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        let app = Application::build_with_store(config, store)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            client: reqwest::Client::new(),
            memory: None,
        }
    }

    pub fn memory(&self) -> &InMemoryStore {
        self.memory
            .as_deref()
            .expect("test app was not spawned with the in-memory store")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Store whose every operation fails with the given driver message and
/// counts how often it was called.
pub struct FailingStore {
    message: String,
    pub calls: AtomicUsize,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DatabaseError(anyhow::anyhow!(self.message.clone())))
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<String, AppError> {
        self.fail()
    }

    async fn find_many(
        &self,
        _collection: &str,
        _filter: &DocumentFilter,
        _limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        self.fail()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.fail()
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.fail()
    }
}
