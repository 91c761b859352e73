use std::sync::Arc;

use slateboard_core::recordings::RecordingStore;

use crate::config::GatewayConfig;
use crate::scripting::ScriptRunner;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Recording file store (staging + recordings root).
    pub store: Arc<RecordingStore>,
    /// Script runner with its admission gate.
    pub runner: Arc<ScriptRunner>,
}
