//! Script runner service.
//!
//! Owns the executor, the configured script path and deadline, and the
//! admission gate that bounds concurrent executions. Held in
//! [`AppState`](crate::state::AppState) as an `Arc<ScriptRunner>`.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::Semaphore;

use slateboard_core::scripting::executor::{ScriptError, ScriptExecutor, ScriptOutput};
use slateboard_core::scripting::python::PythonExecutor;

use crate::config::ScriptConfig;

/// Runs the configured script through an admission gate.
///
/// The gate is a semaphore with `max_concurrent` permits (default 1 =
/// single-flight). Requests arriving while all permits are held queue on
/// permit acquisition; none are rejected. Each admitted request spawns
/// its own independent OS process.
pub struct ScriptRunner {
    executor: PythonExecutor,
    script_path: PathBuf,
    timeout: Duration,
    permits: Semaphore,
}

impl ScriptRunner {
    /// Create a runner from script configuration.
    pub fn new(config: &ScriptConfig) -> Self {
        Self {
            executor: PythonExecutor::new(config.interpreter.clone()),
            script_path: config.script_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            // A zero-permit gate would deadlock every request.
            permits: Semaphore::new(config.max_concurrent.max(1)),
        }
    }

    /// Execute the configured script once, waiting for admission first.
    pub async fn run(&self) -> Result<ScriptOutput, ScriptError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ScriptError::Io(std::io::Error::other("execution gate closed")))?;
        self.executor.execute(&self.script_path, self.timeout).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
