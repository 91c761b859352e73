//! Interpreter-based script executor.
//!
//! Spawns a configured interpreter binary with the script path as its
//! argument. The interpreter and script both come from server-side
//! configuration, never from a request, so this endpoint cannot be turned
//! into an arbitrary-code-execution surface.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;

use super::executor::{ScriptError, ScriptExecutor, ScriptOutput};
use super::subprocess;

/// Executor that runs scripts under a fixed interpreter (e.g. `python3`).
pub struct PythonExecutor {
    /// Interpreter binary, either an absolute path or a name resolved
    /// via `PATH`.
    interpreter: PathBuf,
}

impl PythonExecutor {
    /// Create an executor for the given interpreter binary.
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl ScriptExecutor for PythonExecutor {
    async fn execute(
        &self,
        script_path: &Path,
        timeout: Duration,
    ) -> Result<ScriptOutput, ScriptError> {
        // Check the script up front so a missing script is reported by its
        // own path rather than as an interpreter exit code.
        if fs::metadata(script_path).await.is_err() {
            return Err(ScriptError::NotFound(
                script_path.to_string_lossy().into_owned(),
            ));
        }

        let mut cmd = tokio::process::Command::new(&self.interpreter);
        cmd.arg(script_path);
        subprocess::run_command(&mut cmd, timeout).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a temporary script from the given body.
    ///
    /// Tests use `/bin/sh` as the interpreter: the executor only spawns
    /// whatever binary it was configured with, so a shell stands in for
    /// Python without changing the code path under test.
    fn write_temp_script(body: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut f = tempfile::Builder::new()
            .suffix(".sh")
            .tempfile()
            .expect("create temp file");
        write!(f, "{body}").expect("write body");
        f
    }

    fn sh_executor() -> PythonExecutor {
        PythonExecutor::new("/bin/sh")
    }

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let script = write_temp_script("echo ok\n");
        let output = sh_executor()
            .execute(script.path(), Duration::from_secs(5))
            .await
            .expect("execute");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.trim(), "ok");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn captures_stderr_on_failure() {
        let script = write_temp_script("echo 'bad input' >&2\nexit 1\n");
        let output = sh_executor()
            .execute(script.path(), Duration::from_secs(5))
            .await
            .expect("execute");
        assert_eq!(output.exit_code, 1);
        assert_eq!(output.stderr.trim(), "bad input");
    }

    #[tokio::test]
    async fn missing_interpreter_is_not_found() {
        let script = write_temp_script("echo unreachable\n");
        let result = PythonExecutor::new("/nonexistent/interpreter")
            .execute(script.path(), Duration::from_secs(5))
            .await;
        assert!(matches!(result, Err(ScriptError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_script_is_not_found() {
        let result = sh_executor()
            .execute(Path::new("/nonexistent/generate.py"), Duration::from_secs(5))
            .await;
        match result {
            Err(ScriptError::NotFound(path)) => {
                assert!(path.contains("generate.py"), "error names the script path");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn deadline_kills_hung_script() {
        let script = write_temp_script("sleep 60\n");
        let start = std::time::Instant::now();
        let result = sh_executor()
            .execute(script.path(), Duration::from_millis(300))
            .await;
        match result {
            Err(ScriptError::Timeout { elapsed_ms }) => {
                assert!(elapsed_ms >= 300);
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
        assert!(
            start.elapsed() < Duration::from_secs(10),
            "the deadline must bound the call, not the script"
        );
    }

    #[tokio::test]
    async fn concurrent_executions_do_not_intermix_output() {
        let left = write_temp_script("for i in 1 2 3 4; do echo left; done\n");
        let right = write_temp_script("for i in 1 2 3 4; do echo right; done\n");
        let exec = sh_executor();

        let (a, b) = tokio::join!(
            exec.execute(left.path(), Duration::from_secs(5)),
            exec.execute(right.path(), Duration::from_secs(5)),
        );
        let a = a.expect("left execute");
        let b = b.expect("right execute");

        assert_eq!(a.stdout.lines().count(), 4);
        assert!(a.stdout.lines().all(|l| l == "left"));
        assert_eq!(b.stdout.lines().count(), 4);
        assert!(b.stdout.lines().all(|l| l == "right"));
    }
}
