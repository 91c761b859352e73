//! Script execution interface and shared types.
//!
//! Defines [`ScriptExecutor`], the trait executors implement, along with
//! [`ScriptOutput`] and [`ScriptError`].

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Captured output from a script execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Errors that can occur during script execution.
#[derive(Debug)]
pub enum ScriptError {
    /// The interpreter or script file was not found at the specified path.
    NotFound(String),
    /// The interpreter exists but lacks execute permissions.
    PermissionDenied(String),
    /// The script exceeded its configured deadline and was killed.
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },
    /// The script ran but exited with a non-zero exit code.
    ExecutionFailed {
        /// Process exit code.
        exit_code: i32,
        /// Captured stderr output.
        stderr: String,
    },
    /// An I/O error occurred while spawning or communicating with the process.
    Io(std::io::Error),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Script not found: {path}"),
            Self::PermissionDenied(path) => write!(f, "Permission denied: {path}"),
            Self::Timeout { elapsed_ms } => {
                write!(f, "Script timed out after {elapsed_ms}ms")
            }
            Self::ExecutionFailed { exit_code, stderr } => {
                write!(f, "Script exited with code {exit_code}: {stderr}")
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Trait implemented by script executors.
///
/// An executor receives a script path and a deadline, spawns the
/// appropriate subprocess, and returns its captured output or an error.
/// A non-zero exit code is reported through [`ScriptOutput::exit_code`],
/// not as a [`ScriptError`]; only spawn, I/O, and deadline failures
/// surface as errors.
pub trait ScriptExecutor: Send + Sync {
    /// Execute the script at `script_path`, killing it after `timeout`.
    fn execute(
        &self,
        script_path: &Path,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<ScriptOutput, ScriptError>> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = ScriptError::NotFound("/opt/missing.py".to_string());
        assert_eq!(err.to_string(), "Script not found: /opt/missing.py");
    }

    #[test]
    fn display_permission_denied() {
        let err = ScriptError::PermissionDenied("/opt/locked".to_string());
        assert_eq!(err.to_string(), "Permission denied: /opt/locked");
    }

    #[test]
    fn display_timeout() {
        let err = ScriptError::Timeout { elapsed_ms: 5000 };
        assert_eq!(err.to_string(), "Script timed out after 5000ms");
    }

    #[test]
    fn display_execution_failed() {
        let err = ScriptError::ExecutionFailed {
            exit_code: 2,
            stderr: "bad input".to_string(),
        };
        assert_eq!(err.to_string(), "Script exited with code 2: bad input");
    }

    #[test]
    fn error_source_io() {
        let inner = std::io::Error::other("boom");
        let err = ScriptError::Io(inner);
        assert!(
            std::error::Error::source(&err).is_some(),
            "Io variant should have a source"
        );
    }

    #[test]
    fn error_source_none_for_non_io() {
        let err = ScriptError::Timeout { elapsed_ms: 100 };
        assert!(
            std::error::Error::source(&err).is_none(),
            "Timeout variant should have no source"
        );
    }
}
