//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for resources and their images
//! - The `{header, body}` response envelope
//! - Mapping from domain errors to wire error codes

pub mod error;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use landmark_core::resource::ResourceService;
use landmark_core::storage::StorageService;
use landmark_db::RecordStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Resource service as wired in the running server.
pub type AppResourceService = ResourceService<RecordStore, StorageService>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Resource registration, lookup and image attachment.
    pub resources: Arc<AppResourceService>,
    /// Record store the service writes to.
    pub store: Arc<RecordStore>,
    /// Object storage the service uploads to.
    pub storage: Arc<StorageService>,
}

impl AppState {
    /// Wire the resource service over a record store and object storage.
    ///
    /// Asset keys are created under `namespace`.
    #[must_use]
    pub fn new(store: RecordStore, storage: StorageService, namespace: impl Into<String>) -> Self {
        let store = Arc::new(store);
        let storage = Arc::new(storage);
        let resources = ResourceService::new(Arc::clone(&store), Arc::clone(&storage), namespace);
        Self {
            resources: Arc::new(resources),
            store,
            storage,
        }
    }
}

/// Creates the main application router.
///
/// `max_body_bytes` bounds request bodies; image uploads arrive base64 encoded
/// inside JSON.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
