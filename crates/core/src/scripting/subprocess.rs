//! Shared subprocess management.
//!
//! Provides [`run_command`], the spawn + I/O + deadline logic behind every
//! executor. Stdout and stderr are drained concurrently in their own tasks
//! so a child whose pipe fills while unread cannot stall the execution
//! (pipe backpressure deadlock).

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ScriptError, ScriptOutput};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Output exceeding this limit is truncated to prevent memory exhaustion
/// from extremely verbose scripts.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Spawn `cmd` as a child process, capture stdout/stderr, and enforce
/// `timeout`.
///
/// The caller sets the command program and arguments before calling this
/// function. Spawn failures are classified into
/// [`ScriptError::NotFound`] / [`ScriptError::PermissionDenied`] by the
/// underlying I/O error kind. On deadline expiry the child is killed and
/// a [`ScriptError::Timeout`] is returned.
pub async fn run_command(
    cmd: &mut Command,
    timeout: std::time::Duration,
) -> Result<ScriptOutput, ScriptError> {
    // `kill_on_drop(true)` ensures the child does not outlive the request
    // even if the handling future is dropped mid-wait.
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|e| classify_spawn_error(e, &program))?;

    // Take stdout/stderr handles and read them in spawned tasks so we can
    // still call `child.wait()` (which borrows `&mut child`), and so the
    // two streams drain independently of each other.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    let wait_result = tokio::time::timeout(timeout, child.wait()).await;

    match wait_result {
        Ok(Ok(status)) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            let stdout_bytes = stdout_task.await.unwrap_or_default();
            let stderr_bytes = stderr_task.await.unwrap_or_default();

            Ok(ScriptOutput {
                stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
                stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
                exit_code: status.code().unwrap_or(-1),
                duration_ms,
            })
        }
        Ok(Err(e)) => Err(ScriptError::Io(e)),
        Err(_elapsed) => {
            // Deadline expired. Kill the child; the drain tasks are left to
            // run down on their own because grandchild processes may hold
            // the pipe write ends open past the kill.
            let _ = child.kill().await;
            Err(ScriptError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

/// Map a spawn-time I/O error onto the executor error taxonomy.
fn classify_spawn_error(err: std::io::Error, program: &str) -> ScriptError {
    match err.kind() {
        std::io::ErrorKind::NotFound => ScriptError::NotFound(program.to_string()),
        std::io::ErrorKind::PermissionDenied => ScriptError::PermissionDenied(program.to_string()),
        _ => ScriptError::Io(err),
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
    }
    buf
}
