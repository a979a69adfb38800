//! In-process backend: one mutex over strings and lists.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{BatchOp, KvStore};
use crate::error::StoreError;

#[derive(Default)]
struct Inner {
    strings: HashMap<String, String>,
    lists: HashMap<String, VecDeque<String>>,
}

impl Inner {
    fn apply(&mut self, op: BatchOp) {
        match op {
            BatchOp::ListPush { key, value } => {
                self.lists.entry(key).or_default().push_front(value);
            }
            BatchOp::Set { key, value } => {
                self.strings.insert(key, value);
            }
        }
    }
}

/// Volatile store living in this process. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Drop a string key. Not part of `KvStore`; lets tests fabricate partial records.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.strings.remove(key).is_some())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.strings.get(key).cloned())
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>, StoreError> {
        let inner = self.lock()?;
        Ok(keys.iter().map(|k| inner.strings.get(k).cloned()).collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?
            .strings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .lists
            .get(key)
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_remove(&self, key: &str, count: i64, value: &str) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        let Some(list) = inner.lists.get_mut(key) else {
            return Ok(0);
        };
        let limit = if count == 0 {
            usize::MAX
        } else {
            count.unsigned_abs() as usize
        };
        let mut removed = 0;
        if count >= 0 {
            let mut i = 0;
            while i < list.len() && removed < limit {
                if list[i] == value {
                    list.remove(i);
                    removed += 1;
                } else {
                    i += 1;
                }
            }
        } else {
            let mut i = list.len();
            while i > 0 && removed < limit {
                i -= 1;
                if list[i] == value {
                    list.remove(i);
                    removed += 1;
                }
            }
        }
        if list.is_empty() {
            inner.lists.remove(key);
        }
        Ok(removed)
    }

    async fn apply_batch(&self, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        for op in ops {
            inner.apply(op);
        }
        Ok(())
    }
}
