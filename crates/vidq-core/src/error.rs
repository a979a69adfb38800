//! Error types shared by the job store, launcher, and service.

use thiserror::Error;

/// Failure talking to the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    /// In-memory backend lock was poisoned by a panicking writer.
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the core job operations.
#[derive(Debug, Error)]
pub enum JobError {
    /// Referenced job has no (complete) record.
    #[error("no such job: {0}")]
    NotFound(String),
    /// Metadata probe exited non-zero, timed out, or printed something that is not metadata.
    #[error("metadata probe failed: {0}")]
    ProbeFailed(String),
    /// Download process could not be spawned at all.
    #[error("failed to launch download: {0}")]
    LaunchFailed(String),
    #[error("key-value store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    /// A stored field holds a value this version cannot decode.
    #[error("job {id}: field `{field}` holds unexpected value {value:?}")]
    Corrupt {
        id: String,
        field: &'static str,
        value: String,
    },
}

impl JobError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, JobError::NotFound(_))
    }
}
