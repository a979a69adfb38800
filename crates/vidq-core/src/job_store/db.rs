//! Store handle. Reads and writes live in `jobs`.

use std::sync::Arc;

use super::keys::KeyLayout;
use crate::store::KvStore;

/// Handle to the job records in a key-value store.
///
/// Cheap to clone; clones share the underlying store client. Each field of a
/// job is written by exactly one operation in its lifecycle, so no
/// read-modify-write protection is needed.
#[derive(Clone)]
pub struct JobStore {
    pub(crate) kv: Arc<dyn KvStore>,
    pub(crate) keys: KeyLayout,
}

impl JobStore {
    pub fn new(kv: Arc<dyn KvStore>, keys: KeyLayout) -> Self {
        Self { kv, keys }
    }

    pub fn keys(&self) -> &KeyLayout {
        &self.keys
    }
}

#[cfg(test)]
/// Store over a fresh in-memory backend, plus the backend for direct poking.
pub(crate) fn open_memory() -> (JobStore, crate::store::MemoryStore) {
    let mem = crate::store::MemoryStore::new();
    let store = JobStore::new(Arc::new(mem.clone()), KeyLayout::default());
    (store, mem)
}
