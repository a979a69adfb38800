//! `vidq sweep` – one janitor pass.

use anyhow::Result;
use vidq_core::config::JanitorConfig;
use vidq_core::JobService;

pub async fn run_sweep(service: &JobService, cfg: &JanitorConfig) -> Result<()> {
    let report = service.janitor(cfg).sweep().await?;
    println!(
        "Scanned {} queue entries, pruned {}.",
        report.scanned, report.pruned
    );
    Ok(())
}
