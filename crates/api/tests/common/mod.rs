use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use slateboard_api::config::{GatewayConfig, ScriptConfig};
use slateboard_api::router::build_app_router;
use slateboard_api::scripting::ScriptRunner;
use slateboard_api::state::AppState;
use slateboard_core::recordings::RecordingStore;

/// Multipart boundary used by the handcrafted upload bodies.
const BOUNDARY: &str = "x-slateboard-test-boundary";

/// Build a test `GatewayConfig` rooted in a scratch directory.
///
/// Uses `/bin/sh` as the interpreter so tests can drive the execution
/// path with small shell scripts instead of a Python installation.
pub fn test_config(data_dir: &Path, script_path: &Path) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        recordings_dir: data_dir.join("recordings"),
        staging_dir: data_dir.join("staging"),
        script: ScriptConfig {
            interpreter: PathBuf::from("/bin/sh"),
            script_path: script_path.to_path_buf(),
            timeout_secs: 5,
            max_concurrent: 2,
        },
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub async fn build_test_app(config: GatewayConfig) -> Router {
    let store = Arc::new(RecordingStore::new(
        config.recordings_dir.clone(),
        config.staging_dir.clone(),
    ));
    store.ensure_dirs().await.expect("ensure dirs");

    let runner = Arc::new(ScriptRunner::new(&config.script));

    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        runner,
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Issue an empty-body POST request against the app.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Issue a multipart POST carrying one file field.
pub async fn post_multipart_file(
    app: Router,
    uri: &str,
    field_name: &str,
    file_name: &str,
    content: &[u8],
) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Issue a multipart POST carrying one plain text field (no filename).
pub async fn post_multipart_text(
    app: Router,
    uri: &str,
    field_name: &str,
    value: &str,
) -> Response {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"\r\n\r\n\
         {value}\r\n--{BOUNDARY}--\r\n"
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Collect a response body as a UTF-8 string.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}
