use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use slateboard_core::error::CoreError;
use slateboard_core::scripting::executor::ScriptError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`ScriptError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce the wire
/// contract: upload-path errors render as plain text, script-path errors
/// as a JSON `{ "error", "stderr" }` envelope. Environment causes are
/// logged server-side in full and exposed to the caller only as generic
/// messages; script stderr is intentionally forwarded to aid debugging.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A domain-level error from `slateboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The multipart request carried no `recording` file field.
    #[error("No file uploaded.")]
    MissingFile,

    /// The multipart body could not be read.
    #[error("Malformed upload request: {0}")]
    Multipart(String),

    /// A script execution error.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Convenience type alias for handler return values.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            // --- Upload path: plain text responses ---
            GatewayError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            GatewayError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Failed to persist recording");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error saving file.").into_response()
            }
            GatewayError::MissingFile => {
                (StatusCode::BAD_REQUEST, "No file uploaded.").into_response()
            }
            GatewayError::Multipart(msg) => {
                (StatusCode::BAD_REQUEST, format!("Malformed upload request: {msg}"))
                    .into_response()
            }

            // --- Script path: JSON error envelope ---
            GatewayError::Script(err) => script_error_response(err),
        }
    }
}

/// Map a [`ScriptError`] onto the JSON `{ "error", "stderr" }` envelope.
///
/// A non-zero exit carries the script's own stderr through to the caller;
/// spawn, I/O, and deadline failures are environment conditions and
/// surface only a generic message.
fn script_error_response(err: ScriptError) -> Response {
    let (status, message, stderr) = match err {
        ScriptError::ExecutionFailed { exit_code, stderr } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Script exited with code {exit_code}"),
            stderr,
        ),
        ScriptError::Timeout { elapsed_ms } => {
            tracing::warn!(elapsed_ms, "Script killed at deadline");
            (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Script timed out after {elapsed_ms}ms"),
                String::new(),
            )
        }
        ScriptError::NotFound(path) => {
            tracing::error!(path = %path, "Script launch failed: not found");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to launch script".to_string(),
                String::new(),
            )
        }
        ScriptError::PermissionDenied(path) => {
            tracing::error!(path = %path, "Script launch failed: permission denied");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to launch script".to_string(),
                String::new(),
            )
        }
        ScriptError::Io(io_err) => {
            tracing::error!(error = %io_err, "Script execution I/O error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to launch script".to_string(),
                String::new(),
            )
        }
    };

    let body = json!({
        "error": message,
        "stderr": stderr.trim(),
    });

    (status, axum::Json(body)).into_response()
}
