//! `vidq download <id|url>` – launch the download for a probed job.

use anyhow::Result;
use vidq_core::{JobRef, JobService};

pub async fn run_download(service: &JobService, target: &str, format: Option<String>) -> Result<()> {
    let job = service.start_download(JobRef::parse(target), format).await?;
    println!(
        "Job {} {} (pid {}, format {})",
        job.id,
        job.status,
        job.process_handle,
        job.format.as_deref().unwrap_or("-")
    );
    Ok(())
}
