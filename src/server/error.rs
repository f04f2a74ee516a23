//! HTTP error mapping.
//!
//! One [`AppError`] for every handler, mapped to the response contract the
//! admin UI expects: `{"success": false, "error": "..."}` with the matching
//! status code. Storage failures are logged in full and surfaced sanitized.

use crate::auth;
use crate::catalog::CatalogError;
use crate::types::{InvalidPrice, ParseStatusError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", auth::REMEDIATION_HINT)]
    Unauthorized,
    #[error("Invalid payload: missing {0}")]
    InvalidPayload(&'static str),
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),
    #[error(transparent)]
    InvalidPrice(#[from] InvalidPrice),
    #[error("image {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidPayload(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidPrice(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Catalog(e) => {
                tracing::error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
