//! Request handlers.
//!
//! Every mutating handler authorizes first, validates second, and only then
//! touches the store; a rejected request never leaves a partial write.
//! Handlers open their own catalog connection per request; operations are
//! single local SQLite round trips.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use super::error::{AppError, AppResult};
use super::views;
use crate::auth;
use crate::types::{ImageStatus, StatusFilter, parse_price};

#[derive(Deserialize)]
pub struct AdminQuery {
    token: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    token: Option<String>,
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    id: Option<i64>,
    status: Option<String>,
}

#[derive(Deserialize)]
pub struct EditPriceRequest {
    id: Option<i64>,
    price: Option<Value>,
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Public gallery: approved images, newest first.
pub async fn gallery(State(state): State<AppState>) -> AppResult<Html<String>> {
    let catalog = state.catalog()?;
    let images = catalog.list(StatusFilter::Only(ImageStatus::Approved))?;
    Ok(Html(
        views::gallery_page(&images, &state.contact_phone).into_string(),
    ))
}

/// Check the three token carriers against the gate.
fn authorize(state: &AppState, query_token: Option<&str>, headers: &HeaderMap) -> AppResult<()> {
    let header_token = headers
        .get(auth::TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    let cookie_token = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| auth::cookie_value(h, auth::TOKEN_COOKIE));

    let presented = auth::first_carrier(query_token, header_token, cookie_token);
    if state.gate.authorize(presented) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Moderation dashboard, filtered by the `status` query parameter.
///
/// A valid token presented via the query is persisted into the
/// `admin_token` cookie so follow-up requests (including the dashboard's
/// own API calls) need no query parameter.
pub async fn admin_dashboard(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    authorize(&state, query.token.as_deref(), &headers)?;

    let filter = StatusFilter::from_query(query.status.as_deref());
    let catalog = state.catalog()?;
    let images = catalog.list(filter)?;

    let mut response = Html(views::admin_page(&images, filter).into_string()).into_response();
    if let Some(token) = query.token.as_deref()
        && state.gate.authorize(Some(token))
        && let Ok(cookie) = HeaderValue::from_str(&format!(
            "{}={token}; HttpOnly; Path=/",
            auth::TOKEN_COOKIE
        ))
    {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// Apply a moderation status change.
pub async fn set_status(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    payload: Result<Json<SetStatusRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    authorize(&state, query.token.as_deref(), &headers)?;

    let Json(request) = payload.map_err(|_| AppError::InvalidPayload("body"))?;
    let id = request.id.ok_or(AppError::InvalidPayload("id"))?;
    let status = request
        .status
        .as_deref()
        .ok_or(AppError::InvalidPayload("status"))?
        .parse::<ImageStatus>()?;

    let catalog = state.catalog()?;
    if !catalog.update_status(id, status)? {
        return Err(AppError::NotFound(id));
    }

    Ok(Json(json!({
        "success": true,
        "message": format!("Image {id} status set to {status}"),
    })))
}

/// Set or clear an image's price.
pub async fn edit_price(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    payload: Result<Json<EditPriceRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    authorize(&state, query.token.as_deref(), &headers)?;

    let Json(request) = payload.map_err(|_| AppError::InvalidPayload("body"))?;
    let price = parse_price(request.price.as_ref())?;
    let id = request.id.ok_or(AppError::InvalidPayload("id"))?;

    let catalog = state.catalog()?;
    if !catalog.update_price(id, price)? {
        return Err(AppError::NotFound(id));
    }

    Ok(Json(json!({
        "success": true,
        "message": format!("Image {id} price updated"),
        "price": price,
    })))
}
