//! Axum route handlers for the intake gateway API.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use intake_core::{Record, SubmissionId};
use intake_store::SubmissionStore;
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::{config::GatewayConfig, error::GatewayError, form::read_form};

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<dyn SubmissionStore>;

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub id: SubmissionId,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over `store`.
///
/// Requests that match no API route are served from `config.static_dir`.
pub fn create_router(store: Store, config: &GatewayConfig) -> Router {
    Router::new()
        .route(
            "/submit",
            post(submit).layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
        .route("/api/ideas", get(list_ideas))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(store)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /submit` — store a multipart idea submission and return its ID.
///
/// # Errors
/// Returns [`GatewayError::InvalidForm`] if the body is not a readable
/// multipart form, or [`GatewayError::Storage`] if it cannot be persisted.
pub async fn submit(
    State(store): State<Store>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let multipart = multipart.map_err(|e| GatewayError::InvalidForm(e.body_text()))?;
    let form = read_form(multipart, store.upload_dir()).await?;
    let id = store.store(form.fields, form.files).await?;
    Ok(Json(SubmitResponse { ok: true, id }))
}

/// `GET /api/ideas` — every stored submission as label/value records.
///
/// # Errors
/// Returns [`GatewayError::Listing`] if any submission cannot be read.
pub async fn list_ideas(State(store): State<Store>) -> Result<Json<Vec<Record>>, GatewayError> {
    store.list_all().await.map(Json).map_err(GatewayError::Listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use intake_store::{FsSubmissionStore, StoreConfig};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "intake-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn test_app() -> (TempDir, Router) {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir failed: {e}"),
        };
        let store = match FsSubmissionStore::open(StoreConfig::new(dir.path().join("ideas"))).await {
            Ok(s) => s,
            Err(e) => panic!("store open failed: {e}"),
        };
        let config = GatewayConfig {
            submissions_root: dir.path().join("ideas"),
            static_dir: dir.path().join("public"),
            ..GatewayConfig::default()
        };
        (dir, create_router(Arc::new(store), &config))
    }

    async fn send(app: Router, req: Request<Body>) -> Response {
        match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn submit_request(parts: &[Part<'_>]) -> Request<Body> {
        let req = Request::builder()
            .method("POST")
            .uri("/submit")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)));
        match req {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let (_dir, app) = test_app().await;
        let resp = send(app, get_request("/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn health_is_ok_even_when_storage_is_gone() {
        let (dir, app) = test_app().await;
        if let Err(e) = std::fs::remove_dir_all(dir.path().join("ideas")) {
            panic!("failed to remove root: {e}");
        }
        let resp = send(app, get_request("/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn submit_then_list_returns_relabelled_record() {
        let (dir, app) = test_app().await;

        let resp = send(
            app.clone(),
            submit_request(&[
                Part::Text("fullName", "Ada"),
                Part::Text("city", "London"),
                Part::Text("ideaDesc", "engine: analytical"),
                Part::File("docs", "plan v1.txt", b"step one"),
            ]),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["ok"], true);
        let id: SubmissionId = match body["id"].as_str().map(str::parse::<SubmissionId>) {
            Some(Ok(id)) => id,
            other => panic!("response id must be a uuid, got {other:?}"),
        };

        let attachment = dir
            .path()
            .join("ideas")
            .join(id.to_string())
            .join("Attachments")
            .join("plan_v1.txt");
        match std::fs::read(&attachment) {
            Ok(bytes) => assert_eq!(bytes, b"step one"),
            Err(e) => panic!("attachment missing at {}: {e}", attachment.display()),
        }

        let resp = send(app, get_request("/api/ideas")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let records = body_json(resp).await;
        assert_eq!(
            records,
            serde_json::json!([{
                "Name": "Ada",
                "City": "London",
                "Description": "engine: analytical",
            }])
        );
    }

    #[tokio::test]
    async fn submit_ignores_empty_file_inputs() {
        let (dir, app) = test_app().await;

        let resp = send(
            app,
            submit_request(&[Part::Text("fullName", "Grace"), Part::File("docs", "", b"")]),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let id = body["id"].as_str().unwrap_or_default().to_owned();

        let attachments = dir.path().join("ideas").join(id).join("Attachments");
        match std::fs::read_dir(&attachments) {
            Ok(entries) => assert_eq!(entries.count(), 0),
            Err(e) => panic!("attachments dir missing: {e}"),
        }
    }

    #[tokio::test]
    async fn submit_without_multipart_body_returns_500() {
        let (_dir, app) = test_app().await;
        let req = match Request::builder()
            .method("POST")
            .uri("/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = send(app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Failed to parse form");
        assert!(body["detail"].is_string(), "detail must be present");
    }

    #[tokio::test]
    async fn truncated_multipart_body_returns_500() {
        let (_dir, app) = test_app().await;
        let req = match Request::builder()
            .method("POST")
            .uri("/submit")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"fullName\"\r\n\r\nAda"
            ))) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = send(app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Failed to parse form");
    }

    #[tokio::test]
    async fn list_failure_returns_generic_500() {
        let (dir, app) = test_app().await;
        if let Err(e) = std::fs::remove_dir_all(dir.path().join("ideas")) {
            panic!("failed to remove root: {e}");
        }
        let resp = send(app, get_request("/api/ideas")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({"error": "Failed to fetch ideas"})
        );
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_static_files() {
        let (dir, app) = test_app().await;
        let public = dir.path().join("public");
        if let Err(e) = std::fs::create_dir_all(&public)
            .and_then(|()| std::fs::write(public.join("index.html"), "<h1>Ideas</h1>"))
        {
            panic!("failed to seed static dir: {e}");
        }

        let resp = send(app, get_request("/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        assert_eq!(&bytes[..], b"<h1>Ideas</h1>");
    }

    #[test]
    fn submit_response_serializes_id_as_string() {
        let id = SubmissionId::new();
        let json = match serde_json::to_value(SubmitResponse { ok: true, id }) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, serde_json::json!({"ok": true, "id": id.to_string()}));
    }
}
