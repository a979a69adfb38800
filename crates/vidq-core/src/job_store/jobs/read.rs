//! Job read operations: single record, queue snapshot, record completeness.

use super::super::db::JobStore;
use super::super::keys::{
    FIELD_FORMAT, FIELD_METADATA, FIELD_NAME, FIELD_PID, FIELD_STATUS, FIELD_URL, REQUIRED_FIELDS,
};
use super::super::types::{Job, JobId, JobStatus, RecordState};
use crate::error::JobError;

impl JobStore {
    /// Read one job in a single MGET.
    ///
    /// A missing required field means the record is incomplete (a failed
    /// write or a pruned id) and is reported as `NotFound`. The metadata key
    /// is always fetched so a record without it is rejected here too; the
    /// blob is only kept when `include_metadata` is set.
    pub async fn read(&self, id: &str, include_metadata: bool) -> Result<Job, JobError> {
        let keys = self.keys.fields(
            id,
            &[
                FIELD_NAME,
                FIELD_URL,
                FIELD_STATUS,
                FIELD_PID,
                FIELD_METADATA,
                FIELD_FORMAT,
            ],
        );
        let mut values = self.kv.mget(&keys).await?.into_iter();

        let mut required = |field: &'static str| -> Result<String, JobError> {
            match values.next().flatten() {
                Some(v) => Ok(v),
                None => {
                    tracing::debug!(job_id = %id, field, "job field missing");
                    Err(JobError::NotFound(id.to_string()))
                }
            }
        };
        let display_name = required(FIELD_NAME)?;
        let url = required(FIELD_URL)?;
        let status_raw = required(FIELD_STATUS)?;
        let process_handle = required(FIELD_PID)?;
        let metadata = required(FIELD_METADATA)?;
        let format = values.next().flatten().filter(|f| !f.is_empty());
        let metadata = include_metadata.then_some(metadata);

        let status = JobStatus::from_wire(&status_raw).ok_or_else(|| JobError::Corrupt {
            id: id.to_string(),
            field: FIELD_STATUS,
            value: status_raw.clone(),
        })?;

        Ok(Job {
            id: id.to_string(),
            url,
            display_name,
            status,
            process_handle,
            metadata,
            format,
        })
    }

    /// Snapshot of the queue, newest first. Not consistent with later reads.
    pub async fn list_ids(&self) -> Result<Vec<JobId>, JobError> {
        Ok(self.kv.list_range(&self.keys.queue()).await?)
    }

    /// [`read`](Self::read) for queue scans: a record that is incomplete or
    /// holds an undecodable value is logged and yields `None`, so one bad
    /// entry cannot fail a whole scan. Store errors still propagate.
    pub async fn read_queued(&self, id: &str) -> Result<Option<Job>, JobError> {
        match self.read(id, false).await {
            Ok(job) => Ok(Some(job)),
            Err(JobError::NotFound(_)) => {
                tracing::debug!(job_id = %id, "skipping incomplete queued job");
                Ok(None)
            }
            Err(e @ JobError::Corrupt { .. }) => {
                tracing::warn!(job_id = %id, "skipping unreadable queued job: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// How much of the record behind `id` exists.
    pub async fn record_state(&self, id: &str) -> Result<RecordState, JobError> {
        let keys = self.keys.fields(id, &REQUIRED_FIELDS);
        let values = self.kv.mget(&keys).await?;
        let present = values.iter().filter(|v| v.is_some()).count();
        Ok(match present {
            0 => RecordState::Missing,
            n if n == REQUIRED_FIELDS.len() => RecordState::Complete,
            _ => RecordState::Partial,
        })
    }
}
