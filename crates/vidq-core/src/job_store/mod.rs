//! Job records in the key-value store.
//!
//! Each job is a handful of string keys under `{prefix}.job.{id}.*` plus an
//! entry in the `{prefix}.jobs` list. The layout is shared with existing
//! deployments and must not change.

pub mod db;
mod jobs;
pub mod keys;
pub mod types;

pub use db::JobStore;
pub use keys::{KeyLayout, DEFAULT_KEY_PREFIX};
pub use types::*;
