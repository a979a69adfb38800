//! Job write operations: create, status, handle, queue removal.

use super::super::db::JobStore;
use super::super::keys::{
    FIELD_FORMAT, FIELD_METADATA, FIELD_NAME, FIELD_PID, FIELD_STATUS, FIELD_URL,
};
use super::super::types::JobStatus;
use crate::error::JobError;
use crate::store::BatchOp;

impl JobStore {
    /// Write a new `ready` job and queue it, all in one atomic batch.
    pub async fn create(
        &self,
        id: &str,
        display_name: &str,
        url: &str,
        metadata: &str,
    ) -> Result<(), JobError> {
        let k = &self.keys;
        let ops = vec![
            BatchOp::list_push(k.queue(), id),
            BatchOp::set(k.field(id, FIELD_STATUS), JobStatus::Ready.as_wire()),
            BatchOp::set(k.field(id, FIELD_NAME), display_name),
            BatchOp::set(k.field(id, FIELD_URL), url),
            BatchOp::set(k.field(id, FIELD_PID), ""),
            BatchOp::set(k.field(id, FIELD_METADATA), metadata),
        ];
        self.kv.apply_batch(ops).await?;
        tracing::debug!(job_id = %id, %url, "created job");
        Ok(())
    }

    pub async fn set_status(&self, id: &str, status: JobStatus) -> Result<(), JobError> {
        self.kv
            .set(&self.keys.field(id, FIELD_STATUS), status.as_wire())
            .await?;
        Ok(())
    }

    pub async fn set_handle(&self, id: &str, handle: &str) -> Result<(), JobError> {
        self.kv.set(&self.keys.field(id, FIELD_PID), handle).await?;
        Ok(())
    }

    /// Record a launched download: handle, `downloading`, and the chosen format
    /// land together so no reader sees a handle without the matching status.
    pub async fn mark_downloading(
        &self,
        id: &str,
        handle: &str,
        format: Option<&str>,
    ) -> Result<(), JobError> {
        let k = &self.keys;
        let mut ops = vec![
            BatchOp::set(k.field(id, FIELD_PID), handle),
            BatchOp::set(k.field(id, FIELD_STATUS), JobStatus::Downloading.as_wire()),
        ];
        if let Some(format) = format {
            ops.push(BatchOp::set(k.field(id, FIELD_FORMAT), format));
        }
        self.kv.apply_batch(ops).await?;
        Ok(())
    }

    /// Remove one occurrence of `id` from the queue. Record keys are left alone.
    pub async fn unqueue(&self, id: &str) -> Result<bool, JobError> {
        let removed = self.kv.list_remove(&self.keys.queue(), 1, id).await?;
        Ok(removed > 0)
    }
}
