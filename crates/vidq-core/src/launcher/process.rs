//! Real OS processes via `tokio::process`.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::{CapturedOutput, Launcher};
use crate::error::JobError;

/// Last bytes of stderr kept in error messages.
const STDERR_TAIL: usize = 512;

/// Spawns child processes of this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

fn split_argv(argv: &[String]) -> Option<(&String, &[String])> {
    argv.split_first()
}

fn tail(s: &str) -> &str {
    let s = s.trim_end();
    if s.len() <= STDERR_TAIL {
        return s;
    }
    let mut start = s.len() - STDERR_TAIL;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn run_captured(
        &self,
        argv: &[String],
        timeout: Duration,
    ) -> Result<CapturedOutput, JobError> {
        let (program, args) =
            split_argv(argv).ok_or_else(|| JobError::ProbeFailed("empty command".to_string()))?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| JobError::ProbeFailed(format!("spawn {program}: {e}")))?;

        // Dropping the in-flight future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(|e| JobError::ProbeFailed(format!("wait {program}: {e}")))?,
            Err(_) => {
                tracing::warn!(%program, timeout_secs = timeout.as_secs(), "probe timed out");
                return Err(JobError::ProbeFailed(format!(
                    "{program} did not finish within {}s",
                    timeout.as_secs()
                )));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(JobError::ProbeFailed(format!(
                "{program} exited with {}: {}",
                output.status,
                tail(&stderr)
            )));
        }
        Ok(CapturedOutput { stdout, stderr })
    }

    async fn spawn_detached(&self, argv: &[String]) -> Result<u32, JobError> {
        let (program, args) =
            split_argv(argv).ok_or_else(|| JobError::LaunchFailed("empty command".to_string()))?;

        let mut cmd = Command::new(program);
        // Nobody reads the output; a full pipe would stall the download.
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            // Own process group: a Ctrl-C aimed at the host must not reach the download.
            use std::os::unix::process::CommandExt;
            cmd.as_std_mut().process_group(0);
        }

        let child = cmd
            .spawn()
            .map_err(|e| JobError::LaunchFailed(format!("spawn {program}: {e}")))?;
        let pid = child
            .id()
            .ok_or_else(|| JobError::LaunchFailed(format!("{program} exited immediately")))?;
        tracing::info!(%program, pid, "launched detached process");
        // Dropping the handle leaves the process running; tokio reaps it on exit.
        drop(child);
        Ok(pid)
    }
}
