//! `vidq serve` – host the queue janitor until Ctrl-C.

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use vidq_core::config::JanitorConfig;
use vidq_core::JobService;

/// Janitor settings for `serve`: `--interval` overrides the config file.
pub fn serve_janitor_config(base: &JanitorConfig, interval: Option<u64>) -> JanitorConfig {
    let mut cfg = base.clone();
    if let Some(secs) = interval {
        cfg.interval_secs = secs;
    }
    cfg
}

pub async fn run_serve(service: &JobService, cfg: &JanitorConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let janitor = service.janitor(cfg);
    let interval_secs = janitor.interval().as_secs();
    let handle = janitor.spawn(cancel.clone());
    println!("Janitor running every {interval_secs}s; Ctrl-C to stop.");

    let signal = tokio::signal::ctrl_c().await;
    cancel.cancel();
    handle.await?;
    signal?;
    tracing::info!("serve stopped");
    Ok(())
}
