//! `vidq info <url>` – probe a URL or reuse its existing job.

use anyhow::Result;
use vidq_core::JobService;

pub async fn run_info(service: &JobService, url: &str) -> Result<()> {
    let job = service.probe_or_get(url).await?;
    let info = job.video_info()?;
    println!("Job {} ({})", job.id, job.status);
    println!("Title: {}", job.display_name);
    if let Some(site) = &info.site {
        println!("Site:  {site}");
    }
    match &info.streams {
        Some(streams) if !streams.is_empty() => {
            println!("{:<20} {:<10} {:<10} {}", "FORMAT", "CONTAINER", "QUALITY", "SIZE");
            for (key, s) in streams {
                println!("{:<20} {:<10} {:<10} {}", key, s.container, s.quality, s.size);
            }
        }
        _ => println!("No streams listed."),
    }
    Ok(())
}
