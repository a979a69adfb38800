//! Structural view of the download tool's `--json` probe output.
//!
//! Only the shape is checked; the content is passed through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One downloadable variant of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStream {
    pub container: String,
    pub quality: String,
    pub size: u64,
    pub src: Vec<serde_json::Value>,
}

/// Probe result for one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub streams: Option<BTreeMap<String, VideoStream>>,
}

impl VideoInfo {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Format key of the largest stream, if any streams are listed.
    pub fn best_format(&self) -> Option<&str> {
        self.streams
            .as_ref()?
            .iter()
            .max_by_key(|(_, s)| s.size)
            .map(|(k, _)| k.as_str())
    }
}
