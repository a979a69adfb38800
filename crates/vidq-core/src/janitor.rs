//! Periodic garbage collection of the job queue.
//!
//! A queue entry whose record is incomplete (a partial write, or keys removed
//! out of band) can never be read, listed, or started. The janitor removes
//! such entries from the queue. Jobs that are merely `ready` keep their queue
//! entry: their `pid` key exists, it is just empty.

use std::collections::HashSet;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::JanitorConfig;
use crate::error::JobError;
use crate::job_store::{JobStore, RecordState};

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Queue entries examined.
    pub scanned: usize,
    /// Queue entries removed.
    pub pruned: usize,
}

/// Queue sweeper. Owns its store handle and schedule; the host starts it with
/// [`Janitor::spawn`] and stops it by cancelling the token.
#[derive(Clone)]
pub struct Janitor {
    jobs: JobStore,
    interval: Duration,
}

impl Janitor {
    pub fn new(jobs: JobStore, interval: Duration) -> Self {
        Self { jobs, interval }
    }

    pub fn from_config(jobs: JobStore, cfg: &JanitorConfig) -> Self {
        Self::new(jobs, Duration::from_secs(cfg.interval_secs.max(1)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Remove one queue occurrence of every id whose record is incomplete.
    pub async fn sweep(&self) -> Result<SweepReport, JobError> {
        let ids = self.jobs.list_ids().await?;
        let mut report = SweepReport {
            scanned: ids.len(),
            pruned: 0,
        };
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            match self.jobs.record_state(&id).await? {
                RecordState::Complete => {}
                state @ (RecordState::Partial | RecordState::Missing) => {
                    if self.jobs.unqueue(&id).await? {
                        tracing::info!(job_id = %id, ?state, "pruned incomplete job from queue");
                        report.pruned += 1;
                    }
                }
            }
        }
        Ok(report)
    }

    /// Run [`sweep`](Self::sweep) every interval until `cancel` fires.
    ///
    /// The first sweep happens one full interval after start. A failed sweep
    /// is logged and the loop carries on with the next tick.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(interval_secs = self.interval.as_secs(), "queue janitor started");

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("queue janitor shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        match self.sweep().await {
                            Ok(report) => tracing::debug!(
                                scanned = report.scanned,
                                pruned = report.pruned,
                                "janitor sweep done"
                            ),
                            Err(e) => tracing::error!("janitor sweep skipped: {}", e),
                        }
                    }
                }
            }
        })
    }
}
