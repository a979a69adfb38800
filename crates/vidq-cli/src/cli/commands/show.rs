//! `vidq show <id>` – one job with decoded metadata, as JSON.

use anyhow::Result;
use vidq_core::JobService;

pub async fn run_show(service: &JobService, id: &str) -> Result<()> {
    let job = service.get_job(id).await?;
    let metadata = job.video_info()?;
    let view = serde_json::json!({
        "id": job.id,
        "url": job.url,
        "display_name": job.display_name,
        "status": job.status,
        "process_handle": job.process_handle,
        "format": job.format,
        "metadata": metadata,
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
