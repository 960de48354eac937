//! tm-web library - Top Movies web service
//!
//! Personal movie list: browse movies ranked by rating, add new ones by
//! searching the movie metadata provider, edit or delete existing entries.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod error;
pub mod forms;
pub mod ranking;
pub mod views;

pub use crate::error::{ApiError, ApiResult};

use crate::catalog::MovieCatalog;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store connection pool
    pub db: SqlitePool,
    /// External movie metadata provider
    pub catalog: Arc<dyn MovieCatalog>,
    /// Prefix prepended to poster paths when storing a movie
    pub image_base_url: String,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db: SqlitePool,
        catalog: Arc<dyn MovieCatalog>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            db,
            catalog,
            image_base_url: image_base_url.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::movie_routes())
        .merge(api::add_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
