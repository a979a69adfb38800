//! `vidq list` – show all jobs with reconciled status.

use anyhow::Result;
use vidq_core::JobService;

pub async fn run_list(service: &JobService, json: bool) -> Result<()> {
    let jobs = service.list_jobs().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }
    if jobs.is_empty() {
        println!("No jobs in store.");
    } else {
        println!("{:<36} {:<12} {:<8} {}", "ID", "STATUS", "PID", "NAME");
        for j in jobs {
            let pid = if j.process_handle.is_empty() {
                "-"
            } else {
                j.process_handle.as_str()
            };
            println!("{:<36} {:<12} {:<8} {}", j.id, j.status, pid, j.display_name);
        }
    }
    Ok(())
}
