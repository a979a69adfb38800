//! Types stored in and read from the job store.

use serde::{Serialize, Serializer};

use crate::error::JobError;
use crate::metadata::VideoInfo;

/// Job identifier (UUID v4 string).
pub type JobId = String;

/// Lifecycle state. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobStatus {
    Ready,
    Downloading,
    Finished,
}

impl JobStatus {
    /// Value written to the store. `finish` is the spelling existing records use.
    pub fn as_wire(self) -> &'static str {
        match self {
            JobStatus::Ready => "ready",
            JobStatus::Downloading => "downloading",
            JobStatus::Finished => "finish",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Ready => "ready",
            JobStatus::Downloading => "downloading",
            JobStatus::Finished => "finished",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "ready" => Some(JobStatus::Ready),
            "downloading" => Some(JobStatus::Downloading),
            "finish" | "finished" => Some(JobStatus::Finished),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A tracked download: one URL, probed once, downloaded at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub url: String,
    pub display_name: String,
    pub status: JobStatus,
    /// OS pid of the download process; empty until the download starts.
    pub process_handle: String,
    /// Raw probe output. `None` when read without metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Job {
    pub fn has_started(&self) -> bool {
        !self.process_handle.is_empty()
    }

    /// Decode the stored probe output. Fails if the job was read without metadata.
    pub fn video_info(&self) -> Result<VideoInfo, JobError> {
        let raw = self
            .metadata
            .as_deref()
            .ok_or_else(|| JobError::NotFound(format!("{} (metadata not loaded)", self.id)))?;
        VideoInfo::parse(raw).map_err(|e| JobError::Corrupt {
            id: self.id.clone(),
            field: "metadata",
            value: e.to_string(),
        })
    }
}

/// How much of a job's record exists, as seen by the janitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Every required field is present (values may be empty).
    Complete,
    /// Some required fields are present, some are not.
    Partial,
    /// No required field is present.
    Missing,
}
