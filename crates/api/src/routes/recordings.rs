//! Recording upload endpoint.
//!
//! Accepts a multipart upload with one file field named `recording`,
//! validates the declared filename before any filesystem write, stages
//! the payload, and commits it into the recordings root. Responses are
//! plain text; an existing recording with the same name is overwritten.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use slateboard_core::recordings::filename;

use crate::error::{GatewayError, GatewayResult};
use crate::state::AppState;

/// POST /upload
///
/// Walks the multipart fields until it finds `recording`; other fields
/// are ignored. A request without that field (or without a declared
/// filename) is a client error and writes nothing to disk.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> GatewayResult<(StatusCode, &'static str)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::Multipart(e.to_string()))?
    {
        if field.name() != Some("recording") {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_owned)
            .ok_or(GatewayError::MissingFile)?;

        // Validation stage: reject bad names before any filesystem write.
        filename::validate(&name)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| GatewayError::Multipart(e.to_string()))?;

        let staging_path = state.store.stage(&data).await?;
        let dest = state.store.commit(&staging_path, &name).await?;

        tracing::info!(file = %dest.display(), bytes = data.len(), "Recording stored");
        return Ok((StatusCode::OK, "File uploaded and moved successfully!"));
    }

    Err(GatewayError::MissingFile)
}

/// Mount upload routes.
///
/// Recordings can be arbitrarily large, so axum's default body limit is
/// lifted on this route; the payload is staged to disk immediately after
/// the field is read.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::disable())
}
