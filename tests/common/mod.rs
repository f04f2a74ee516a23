//! Shared helpers for the HTTP integration tests.
//!
//! Builds the same router `serve` runs in production, backed by a throwaway
//! database and content directory, and drives it with
//! `tower::ServiceExt::oneshot`; no sockets involved.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vitrine::auth::AccessGate;
use vitrine::catalog::Catalog;
use vitrine::server::{AppState, router};

pub const TOKEN: &str = "s3cret";

/// A throwaway site: temp database, temp content directory, built state.
pub struct TestSite {
    // Held for its Drop; the state only stores paths into it.
    _tmp: TempDir,
    pub state: AppState,
}

impl TestSite {
    /// Site with the admin token configured.
    pub fn new() -> Self {
        Self::with_token(Some(TOKEN))
    }

    pub fn with_token(token: Option<&str>) -> Self {
        let tmp = TempDir::new().unwrap();
        let content_dir = tmp.path().join("images");
        std::fs::create_dir_all(&content_dir).unwrap();
        let state = AppState {
            db_path: tmp.path().join("site.db"),
            content_dir,
            gate: AccessGate::new(token.map(String::from)),
            contact_phone: "4915551234567".to_string(),
        };
        // Apply the schema up front so seeding can run before any request.
        Catalog::open(&state.db_path).unwrap();
        Self { _tmp: tmp, state }
    }

    pub fn app(&self) -> Router {
        router(self.state.clone())
    }

    /// A catalog handle onto the site's database, for seeding and asserting.
    pub fn catalog(&self) -> Catalog {
        Catalog::open(&self.state.db_path).unwrap()
    }

    /// Seed one pending row and return its id.
    pub fn seed(&self, filename: &str, uploaded: DateTime<Utc>) -> i64 {
        let catalog = self.catalog();
        assert!(catalog.create_if_absent(filename, uploaded).unwrap());
        catalog
            .list(vitrine::types::StatusFilter::All)
            .unwrap()
            .into_iter()
            .find(|r| r.filename == filename)
            .unwrap()
            .id
    }

    pub fn write_content_file(&self, relative: &str, bytes: &[u8]) {
        let path = self.state.content_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, bytes).unwrap();
    }
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, d, 9, 0, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(name, value)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a JSON body, authorized via the `X-Admin-Token` header carrier.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    post_json_with_token(app, uri, body, Some(TOKEN)).await
}

pub async fn post_json_with_token(
    app: Router,
    uri: &str,
    body: &Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("X-Admin-Token", token);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
