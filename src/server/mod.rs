//! HTTP surface: public gallery, admin dashboard, mutation API, image files.
//!
//! | Method | Path | Auth | Purpose |
//! |--------|------|------|---------|
//! | GET | `/` | none | approved gallery, newest first |
//! | GET | `/health` | none | liveness probe |
//! | GET | `/images/{path}` | none | raw file bytes from the content directory |
//! | GET | `/admin` | token | moderation dashboard, `?status=` filter |
//! | POST | `/api/set_status` | token | moderation transition |
//! | POST | `/api/edit_price` | token | price update |
//!
//! State holds the database *path*, not a connection: each request opens
//! its own catalog, so there is no shared mutable cache and no staleness
//! window beyond a single operation.

pub mod error;
pub mod handlers;
pub mod views;

use crate::auth::AccessGate;
use crate::catalog::{Catalog, CatalogError};
use crate::config::AppConfig;
use axum::Router;
use axum::routing::{get, post};
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub content_dir: PathBuf,
    pub gate: AccessGate,
    pub contact_phone: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            db_path: config.db_path.clone(),
            content_dir: config.content_dir.clone(),
            gate: AccessGate::new(config.admin_token.clone()),
            contact_phone: config.contact_phone.clone(),
        }
    }

    /// Open a fresh catalog connection for one operation.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::open(&self.db_path)
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let content_dir = state.content_dir.clone();
    Router::new()
        .route("/", get(handlers::gallery))
        .route("/health", get(handlers::health))
        .route("/admin", get(handlers::admin_dashboard))
        .route("/api/set_status", post(handlers::set_status))
        .route("/api/edit_price", post(handlers::edit_price))
        .nest_service("/images", ServeDir::new(content_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: &AppConfig) -> std::io::Result<()> {
    let state = AppState::from_config(config);
    if !state.gate.is_configured() {
        tracing::warn!("admin_token is not configured: all admin requests will be denied");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "serving image catalog");
    axum::serve(listener, router(state)).await
}
