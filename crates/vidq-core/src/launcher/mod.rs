//! Starting the external download tool.
//!
//! `ToolCommand` builds argument vectors; `Launcher` runs them. The service
//! only sees the trait so tests (and other process supervisors) can stand in
//! for real processes.

mod process;

pub use process::ProcessLauncher;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ToolConfig;
use crate::error::JobError;

/// Captured output of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Run `argv` to completion and capture its output.
    ///
    /// Spawn failure, non-zero exit, or exceeding `timeout` is `ProbeFailed`.
    async fn run_captured(
        &self,
        argv: &[String],
        timeout: Duration,
    ) -> Result<CapturedOutput, JobError>;

    /// Start `argv` without waiting and return its OS process id.
    ///
    /// Spawn failure is `LaunchFailed`.
    async fn spawn_detached(&self, argv: &[String]) -> Result<u32, JobError>;
}

/// Argument vectors for the download tool (you-get compatible flags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub cookie_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl From<&ToolConfig> for ToolCommand {
    fn from(cfg: &ToolConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            cookie_file: cfg.cookie_file.clone(),
            output_dir: cfg.output_dir.clone(),
        }
    }
}

impl ToolCommand {
    /// `<program> --json <url> [-c <cookies>]`
    pub fn probe_args(&self, url: &str) -> Vec<String> {
        let mut argv = vec![self.program.clone(), "--json".to_string(), url.to_string()];
        self.push_cookies(&mut argv);
        argv
    }

    /// `<program> [-o <dir>] [--format=<fmt>] <url> [-c <cookies>]`
    pub fn download_args(&self, url: &str, format: Option<&str>) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        if let Some(dir) = &self.output_dir {
            argv.push("-o".to_string());
            argv.push(dir.display().to_string());
        }
        if let Some(format) = format {
            argv.push(format!("--format={format}"));
        }
        argv.push(url.to_string());
        self.push_cookies(&mut argv);
        argv
    }

    fn push_cookies(&self, argv: &mut Vec<String>) {
        if let Some(cookies) = &self.cookie_file {
            argv.push("-c".to_string());
            argv.push(cookies.display().to_string());
        }
    }
}
