pub mod config;
pub mod logging;

pub mod dedup;
pub mod error;
pub mod janitor;
pub mod job_store;
pub mod launcher;
pub mod liveness;
pub mod metadata;
pub mod service;
pub mod store;

pub use error::{JobError, StoreError};
pub use service::{JobRef, JobService};
