//! Application state, router, and server lifecycle.

use crate::config::KirConfig;
use crate::handlers;
use crate::services::{DocumentStore, MongoStore};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: KirConfig,
    /// Process-wide database handle, opened once at startup. `None` when no
    /// database is configured.
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn require_store(&self) -> Result<&dyn DocumentStore, AppError> {
        self.store.as_deref().ok_or_else(|| {
            tracing::error!("Request needs the database but none is configured");
            AppError::DatabaseUnavailable
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(handlers::read_root))
        .route("/api/hello", get(handlers::hello))
        .route(
            "/api/announcements",
            get(handlers::list_announcements).post(handlers::create_announcement),
        )
        .route(
            "/api/works",
            get(handlers::list_works).post(handlers::create_work),
        )
        .route("/test", get(handlers::test_database))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_endpoint))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

/// `*` mirrors the caller's origin and allows credentials; anything else is
/// an explicit allow-list.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Opens the MongoDB handle when `DATABASE_URL` and `DATABASE_NAME` are
    /// both configured, then binds the listener.
    pub async fn build(config: KirConfig) -> Result<Self, AppError> {
        let store = match config.database.connection() {
            Some((uri, name)) => {
                let mongo: Arc<dyn DocumentStore> =
                    Arc::new(MongoStore::connect(uri, name).await.map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?);
                Some(mongo)
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL or DATABASE_NAME not set; data endpoints will answer 500"
                );
                None
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Binds the listener around an already-opened store (port 0 = random port).
    pub async fn build_with_store(
        config: KirConfig,
        store: Option<Arc<dyn DocumentStore>>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { config, store },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::services::InMemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use service_core::config::Config as CoreConfig;
    use tower::ServiceExt;

    fn state(allowed_origins: &[&str], store: Option<Arc<dyn DocumentStore>>) -> AppState {
        AppState {
            config: KirConfig {
                common: CoreConfig { port: 0 },
                service_name: "kir-service".to_string(),
                log_level: "info".to_string(),
                otlp_endpoint: None,
                allowed_origins: allowed_origins.iter().map(|o| o.to_string()).collect(),
                database: DatabaseConfig::default(),
            },
            store,
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = build_router(state(&["*"], None));

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn allow_list_only_echoes_listed_origins() {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::default());
        let app = build_router(state(&["https://kir.example", "not a\nheader"], Some(store)));

        let allowed = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header("origin", "https://kir.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()["access-control-allow-origin"],
            "https://kir.example"
        );

        let other = app
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header("origin", "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(other.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn require_store_without_database_is_unavailable() {
        let err = state(&["*"], None).require_store().err().unwrap();
        assert!(matches!(err, AppError::DatabaseUnavailable));
    }
}
