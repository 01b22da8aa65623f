//! # Articles Backend
//!
//! JSON:API server for a single `articles` resource.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Config**: Environment driven settings (bind address, database, public URL)
//! - **Domain**: Validation rules, sorting, and the article service
//! - **Storage**: SQLite persistence through sqlx
//! - **IO**: JSON:API handlers, middleware, and error documents
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (media type negotiation, document checks, handlers)
//!     ↓
//! Domain Layer (ArticleService, validation, sorting)
//!     ↓
//! Storage Layer (ArticleStorage over SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header::LOCATION, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ArticleService;
use crate::storage::{ArticleRepository, DbConnection};

/// Main application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub article_service: ArticleService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(article_service: ArticleService, config: AppConfig) -> Self {
        Self {
            article_service,
            config: Arc::new(config),
        }
    }

    /// Public base URL used to build resource links
    pub fn base_url(&self) -> &str {
        &self.config.app_url
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let article_service = ArticleService::new(Arc::new(ArticleRepository::new(db_conn)));

    info!("Setting up application state");
    Ok(AppState::new(article_service, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow browser clients to make requests
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([LOCATION]);

    // Header negotiation wraps document validation, so a bad Accept or
    // Content-Type is reported before the body is inspected.
    let api_routes = Router::new()
        .route(
            "/articles",
            get(io::list_articles)
                .post(io::create_article)
                .fallback(io::errors::method_not_allowed),
        )
        .route(
            "/articles/:id",
            get(io::get_article)
                .patch(io::update_article)
                .delete(io::delete_article)
                .fallback(io::errors::method_not_allowed),
        )
        .fallback(io::errors::route_not_found)
        .layer(middleware::from_fn(io::validate_json_api_document))
        .layer(middleware::from_fn(io::validate_json_api_headers));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
