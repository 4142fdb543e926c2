//! CLI subprocess execution.
//!
//! Spawns the chain CLI with an explicit argv, captures stdout/stderr and
//! enforces a timeout. The child is spawned with `kill_on_drop(true)`, so
//! it is killed both when the timeout fires and when the calling future is
//! dropped (for example because the HTTP client went away).

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::LedgerError;

/// Maximum stdout or stderr size captured per stream (1 MiB).
const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Captured output of a finished CLI run.
#[derive(Debug, Clone)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    pub duration_ms: u64,
}

impl CliOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// The text to surface on failure: stderr, or stdout when stderr is empty.
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Run `program` with `argv`, waiting at most `timeout`.
///
/// Returns the captured output regardless of exit status; callers decide
/// what a non-zero exit means.
pub async fn run_cli(
    program: &str,
    argv: &[String],
    timeout: Duration,
) -> Result<CliOutput, LedgerError> {
    let mut cmd = Command::new(program);
    cmd.args(argv)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|source| LedgerError::Spawn {
        program: program.to_string(),
        source,
    })?;

    // Drain both pipes concurrently so a chatty CLI cannot block on a full
    // pipe while we wait on its exit status.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();
    let stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    let stdout_abort = stdout_task.abort_handle();
    let stderr_abort = stderr_task.abort_handle();

    // The deadline covers the pipes too: a background grandchild can hold
    // them open long after the CLI itself has exited.
    let finished = tokio::time::timeout(timeout, async {
        let status = child.wait().await?;
        let stdout_bytes = stdout_task.await.unwrap_or_default();
        let stderr_bytes = stderr_task.await.unwrap_or_default();
        Ok::<_, std::io::Error>((status, stdout_bytes, stderr_bytes))
    })
    .await;

    match finished {
        Ok(Ok((status, stdout_bytes, stderr_bytes))) => Ok(CliOutput {
            stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
            exit_code: status.code().unwrap_or(-1),
            duration_ms: start.elapsed().as_millis() as u64,
        }),
        Ok(Err(source)) => Err(LedgerError::Spawn {
            program: program.to_string(),
            source,
        }),
        Err(_elapsed) => {
            // `child` drops on return and is killed; the readers release
            // whatever pipes a grandchild still holds.
            stdout_abort.abort();
            stderr_abort.abort();
            Err(LedgerError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
