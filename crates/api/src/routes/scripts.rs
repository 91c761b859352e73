//! Script execution endpoint.
//!
//! Takes no input from the caller: the interpreter and script paths are
//! server-side configuration. Exit code 0 responds with the trimmed
//! stdout; a non-zero exit or launch failure responds with the JSON
//! error envelope (see [`crate::error`]).

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use slateboard_core::scripting::executor::ScriptError;

use crate::error::{GatewayError, GatewayResult};
use crate::state::AppState;

/// Success response for a script run.
#[derive(Debug, Serialize)]
pub struct RunScriptResponse {
    /// Trimmed stdout of the script.
    pub message: String,
}

/// POST /run-python
async fn run_script(State(state): State<AppState>) -> GatewayResult<Json<RunScriptResponse>> {
    let output = state.runner.run().await?;

    if output.exit_code != 0 {
        tracing::warn!(
            exit_code = output.exit_code,
            duration_ms = output.duration_ms,
            "Script exited with failure"
        );
        return Err(GatewayError::Script(ScriptError::ExecutionFailed {
            exit_code: output.exit_code,
            stderr: output.stderr,
        }));
    }

    tracing::info!(duration_ms = output.duration_ms, "Script completed");
    Ok(Json(RunScriptResponse {
        message: output.stdout.trim().to_string(),
    }))
}

/// Mount script execution routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/run-python", post(run_script))
}
