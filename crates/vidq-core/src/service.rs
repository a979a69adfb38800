//! The four job operations offered to request handlers.
//!
//! `JobService` is built explicitly by the host with its store, launcher, and
//! liveness source; there is no global state. Every call is independent and
//! may run concurrently with others and with the janitor.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{JanitorConfig, ToolConfig, VidqConfig};
use crate::dedup;
use crate::error::JobError;
use crate::janitor::Janitor;
use crate::job_store::{Job, JobStatus, JobStore, KeyLayout};
use crate::launcher::{Launcher, ProcessLauncher, ToolCommand};
use crate::liveness::{Liveness, Reconciler, SysinfoLiveness};
use crate::metadata::VideoInfo;
use crate::store::{KvStore, RedisStore};

/// How a caller names the job to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRef {
    Id(String),
    Url(String),
}

impl JobRef {
    /// `http://` or `https://` inputs are URLs, anything else is an id.
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            JobRef::Url(s.to_string())
        } else {
            JobRef::Id(s.to_string())
        }
    }
}

/// Job tracking over a shared key-value store.
#[derive(Clone)]
pub struct JobService {
    jobs: JobStore,
    reconciler: Reconciler,
    launcher: Arc<dyn Launcher>,
    tool: ToolCommand,
    probe_timeout: Duration,
}

impl JobService {
    pub fn new(
        kv: Arc<dyn KvStore>,
        keys: KeyLayout,
        launcher: Arc<dyn Launcher>,
        liveness: Arc<dyn Liveness>,
        tool: &ToolConfig,
    ) -> Self {
        let jobs = JobStore::new(kv, keys);
        Self {
            reconciler: Reconciler::new(jobs.clone(), liveness),
            jobs,
            launcher,
            tool: ToolCommand::from(tool),
            probe_timeout: Duration::from_secs(tool.probe_timeout_secs.max(1)),
        }
    }

    /// Production wiring: Redis store, real processes, `sysinfo` liveness.
    pub async fn connect(cfg: &VidqConfig) -> Result<Self, JobError> {
        let kv = RedisStore::connect(&cfg.store.url).await?;
        Ok(Self::new(
            Arc::new(kv),
            KeyLayout::new(cfg.store.key_prefix.clone()),
            Arc::new(ProcessLauncher::new()),
            Arc::new(SysinfoLiveness::new()),
            &cfg.tool,
        ))
    }

    pub fn jobs(&self) -> &JobStore {
        &self.jobs
    }

    /// A janitor sharing this service's store.
    pub fn janitor(&self, cfg: &JanitorConfig) -> Janitor {
        Janitor::from_config(self.jobs.clone(), cfg)
    }

    /// Existing job for `url`, or probe the URL and create a `ready` job.
    ///
    /// The returned job carries its metadata.
    pub async fn probe_or_get(&self, url: &str) -> Result<Job, JobError> {
        if let Some(id) = dedup::find_by_url(&self.jobs, url).await? {
            return self.jobs.read(&id, true).await;
        }

        let argv = self.tool.probe_args(url);
        tracing::info!(%url, "probing metadata");
        let output = self.launcher.run_captured(&argv, self.probe_timeout).await?;
        let info = VideoInfo::parse(&output.stdout)
            .map_err(|e| JobError::ProbeFailed(format!("unexpected probe output: {e}")))?;

        let id = uuid::Uuid::new_v4().to_string();
        let display_name = info
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.to_string());
        self.jobs
            .create(&id, &display_name, url, &output.stdout)
            .await?;
        tracing::info!(job_id = %id, %url, title = %display_name, "job ready");

        Ok(Job {
            id,
            url: url.to_string(),
            display_name,
            status: JobStatus::Ready,
            process_handle: String::new(),
            metadata: Some(output.stdout),
            format: None,
        })
    }

    /// Launch the download for a `ready` job and record its process handle.
    ///
    /// Without an explicit `format` the largest stream in the stored metadata
    /// is chosen. A job that already started is returned as is; nothing is
    /// launched twice. If the launch fails the job stays `ready`.
    pub async fn start_download(
        &self,
        job: JobRef,
        format: Option<String>,
    ) -> Result<Job, JobError> {
        let id = match job {
            JobRef::Id(id) => id,
            JobRef::Url(url) => dedup::find_by_url(&self.jobs, &url)
                .await?
                .ok_or(JobError::NotFound(url))?,
        };
        let mut job = self.jobs.read(&id, true).await?;
        if job.has_started() || job.status != JobStatus::Ready {
            tracing::info!(job_id = %id, status = %job.status, "download already started");
            return Ok(job);
        }

        let format = match format.filter(|f| !f.is_empty()) {
            Some(f) => Some(f),
            None => job.video_info()?.best_format().map(str::to_string),
        };
        let argv = self.tool.download_args(&job.url, format.as_deref());
        let pid = self.launcher.spawn_detached(&argv).await?;
        let handle = pid.to_string();

        self.jobs
            .mark_downloading(&id, &handle, format.as_deref())
            .await?;
        tracing::info!(job_id = %id, pid, format = ?format, "download started");

        job.status = JobStatus::Downloading;
        job.process_handle = handle;
        job.format = format;
        Ok(job)
    }

    /// Every queued job without metadata, after reconciling all statuses.
    ///
    /// Queue order (newest first); repeated ids, incomplete records and
    /// records with undecodable fields are left out.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, JobError> {
        self.reconciler.reconcile_all().await?;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in self.jobs.list_ids().await? {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(job) = self.jobs.read_queued(&id).await? {
                out.push(job);
            }
        }
        Ok(out)
    }

    /// One job with metadata, after reconciling its status.
    pub async fn get_job(&self, id: &str) -> Result<Job, JobError> {
        self.reconciler.reconcile(id).await?;
        self.jobs.read(id, true).await
    }
}
