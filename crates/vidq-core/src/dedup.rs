//! URL -> job lookup used to avoid probing or downloading a URL twice.
//!
//! The whole queue is scanned (newest first) and the first job whose URL
//! matches wins. Stopping at the first non-matching entry would only ever find
//! the most recent job, so the scan continues past mismatches, incomplete
//! records and records it cannot decode.

use crate::error::JobError;
use crate::job_store::{JobId, JobStore};

/// Find the newest job recorded for `url`.
pub async fn find_by_url(jobs: &JobStore, url: &str) -> Result<Option<JobId>, JobError> {
    for id in jobs.list_ids().await? {
        if let Some(job) = jobs.read_queued(&id).await? {
            if job.url == url {
                tracing::debug!(job_id = %id, %url, "found existing job for url");
                return Ok(Some(id));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_store::db::open_memory;
    use crate::job_store::keys::{FIELD_METADATA, FIELD_NAME, FIELD_STATUS};
    use crate::store::KvStore;

    const META: &str = r#"{"url": "https://example.com/v1"}"#;

    #[tokio::test]
    async fn empty_queue_finds_nothing() {
        let (store, _) = open_memory();
        assert_eq!(find_by_url(&store, "https://a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn finds_most_recent_job() {
        let (store, _) = open_memory();
        store.create("a", "A", "https://a", META).await.unwrap();
        assert_eq!(
            find_by_url(&store, "https://a").await.unwrap().as_deref(),
            Some("a")
        );
    }

    /// An early-return scan would stop at "c" and report no match.
    #[tokio::test]
    async fn finds_older_job_behind_newer_mismatches() {
        let (store, _) = open_memory();
        store.create("a", "A", "https://a", META).await.unwrap();
        store.create("b", "B", "https://b", META).await.unwrap();
        store.create("c", "C", "https://c", META).await.unwrap();
        assert_eq!(
            find_by_url(&store, "https://a").await.unwrap().as_deref(),
            Some("a")
        );
        assert_eq!(find_by_url(&store, "https://zzz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn prefers_newest_duplicate() {
        let (store, _) = open_memory();
        store.create("old", "A", "https://a", META).await.unwrap();
        store.create("new", "A", "https://a", META).await.unwrap();
        assert_eq!(
            find_by_url(&store, "https://a").await.unwrap().as_deref(),
            Some("new")
        );
    }

    #[tokio::test]
    async fn skips_incomplete_records() {
        let (store, mem) = open_memory();
        store.create("a", "A", "https://a", META).await.unwrap();
        store.create("b", "B", "https://a", META).await.unwrap();
        mem.delete(&store.keys().field("b", FIELD_NAME)).unwrap();
        assert_eq!(
            find_by_url(&store, "https://a").await.unwrap().as_deref(),
            Some("a")
        );
    }

    #[tokio::test]
    async fn skips_record_without_metadata() {
        let (store, mem) = open_memory();
        store.create("a", "A", "https://a", META).await.unwrap();
        mem.delete(&store.keys().field("a", FIELD_METADATA)).unwrap();
        assert_eq!(find_by_url(&store, "https://a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_status_does_not_break_the_scan() {
        let (store, mem) = open_memory();
        store.create("a", "A", "https://a", META).await.unwrap();
        store.create("b", "B", "https://b", META).await.unwrap();
        mem.set(&store.keys().field("b", FIELD_STATUS), "paused")
            .await
            .unwrap();
        assert_eq!(
            find_by_url(&store, "https://a").await.unwrap().as_deref(),
            Some("a")
        );
        assert_eq!(find_by_url(&store, "https://b").await.unwrap(), None);
    }
}
