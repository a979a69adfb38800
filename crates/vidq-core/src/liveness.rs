//! Liveness polling and status reconciliation.
//!
//! A request handler has no way to be told that a download it did not spawn
//! has exited, so `downloading` jobs are checked against the OS process table
//! and moved to `finished` once their pid is gone. A recycled pid can make a
//! finished download look alive; `downloading` is best-effort, not real time.

use std::sync::{Arc, Mutex};

use sysinfo::{Pid, ProcessStatus, System};

use crate::error::JobError;
use crate::job_store::{Job, JobStatus, JobStore};

/// Answers "is the process behind this handle still running?".
pub trait Liveness: Send + Sync {
    fn is_running(&self, handle: &str) -> bool;
}

/// Polls the local process table through `sysinfo`.
///
/// Zombies count as exited. A handle that is not a pid is never running.
#[derive(Default)]
pub struct SysinfoLiveness {
    sys: Mutex<System>,
}

impl SysinfoLiveness {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
        }
    }
}

impl Liveness for SysinfoLiveness {
    fn is_running(&self, handle: &str) -> bool {
        let Ok(raw) = handle.trim().parse::<u32>() else {
            tracing::warn!(handle, "process handle is not a pid");
            return false;
        };
        let pid = Pid::from_u32(raw);
        let mut sys = self.sys.lock().unwrap_or_else(|e| e.into_inner());
        if !sys.refresh_process(pid) {
            return false;
        }
        sys.process(pid)
            .map(|p| !matches!(p.status(), ProcessStatus::Zombie | ProcessStatus::Dead))
            .unwrap_or(false)
    }
}

/// Re-derives job status from process liveness.
#[derive(Clone)]
pub struct Reconciler {
    jobs: JobStore,
    liveness: Arc<dyn Liveness>,
}

impl Reconciler {
    pub fn new(jobs: JobStore, liveness: Arc<dyn Liveness>) -> Self {
        Self { jobs, liveness }
    }

    /// Reconcile an already-read job. Returns the (possibly advanced) status.
    ///
    /// Only `status` is ever written, and only `downloading -> finished`.
    pub async fn reconcile_job(&self, job: &Job) -> Result<JobStatus, JobError> {
        if job.process_handle.is_empty() || job.status == JobStatus::Finished {
            return Ok(job.status);
        }
        if self.liveness.is_running(&job.process_handle) {
            return Ok(job.status);
        }
        self.jobs.set_status(&job.id, JobStatus::Finished).await?;
        tracing::info!(job_id = %job.id, pid = %job.process_handle, "download process gone, job finished");
        Ok(JobStatus::Finished)
    }

    /// Reconcile one job by id. `NotFound` if its record is incomplete.
    pub async fn reconcile(&self, id: &str) -> Result<JobStatus, JobError> {
        let job = self.jobs.read(id, false).await?;
        self.reconcile_job(&job).await
    }

    /// Reconcile every queued job. Incomplete or undecodable records are skipped.
    /// Returns how many jobs were moved to `finished`.
    pub async fn reconcile_all(&self) -> Result<usize, JobError> {
        let mut finished = 0;
        for id in self.jobs.list_ids().await? {
            let Some(job) = self.jobs.read_queued(&id).await? else {
                continue;
            };
            let before = job.status;
            if self.reconcile_job(&job).await? != before {
                finished += 1;
            }
        }
        Ok(finished)
    }
}
