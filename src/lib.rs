pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;

use crate::config::SearchSettings;
use crate::models::catalogue::ReferenceCatalogue;
use crate::services::{
    job_store::{JobStore, PgJobStore},
    search_service::SearchService,
};

#[derive(Clone)]
pub struct AppState {
    pub search_service: SearchService,
}

impl AppState {
    pub fn new(pool: PgPool, catalogue: ReferenceCatalogue, settings: SearchSettings) -> Self {
        Self::with_store(Arc::new(PgJobStore::new(pool)), catalogue, settings)
    }

    pub fn with_store(
        store: Arc<dyn JobStore>,
        catalogue: ReferenceCatalogue,
        settings: SearchSettings,
    ) -> Self {
        let search_service = SearchService::new(store, Arc::new(catalogue), settings);
        Self { search_service }
    }
}

/// Public routes without transport layers; `main` adds CORS and tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/public/jobs/search", get(routes::search::search_jobs))
        .route("/api/public/catalogue", get(routes::search::get_catalogue))
        .with_state(state)
}
