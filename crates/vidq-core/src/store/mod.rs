//! Key-value store abstraction the job store is written against.
//!
//! The operations mirror the small subset of Redis the job layout needs: string
//! keys, one list, and an all-or-nothing batch. `RedisStore` is the production
//! backend; `MemoryStore` serves single-process use and tests.

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use async_trait::async_trait;

use crate::error::StoreError;

/// One write inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Push `value` onto the head of the list at `key`.
    ListPush { key: String, value: String },
    /// Set the string at `key`.
    Set { key: String, value: String },
}

impl BatchOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        BatchOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn list_push(key: impl Into<String>, value: impl Into<String>) -> Self {
        BatchOp::ListPush {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Async key-value store with Redis-like semantics.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Read several keys at once; the result has one slot per key, in order.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Whole list at `key`, head first. Missing key reads as empty.
    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Remove occurrences of `value` from the list at `key` with LREM semantics:
    /// `count > 0` from the head, `count < 0` from the tail, `0` removes all.
    /// Returns the number removed.
    async fn list_remove(&self, key: &str, count: i64, value: &str) -> Result<usize, StoreError>;

    /// Apply every op or none; readers never observe a partial batch.
    async fn apply_batch(&self, ops: Vec<BatchOp>) -> Result<(), StoreError>;
}
