//! CLI for the vidq job tracker. It is the request-handling layer in front of
//! `JobService`: each subcommand maps to one core operation.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use vidq_core::config;
use vidq_core::JobService;

use commands::{
    run_download, run_info, run_list, run_serve, run_show, run_sweep, serve_janitor_config,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vidq")]
#[command(about = "vidq: track external video download jobs in Redis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Probe a URL's metadata, or show the job already recorded for it.
    Info {
        /// Video page URL.
        url: String,
    },

    /// Start downloading a probed job.
    Download {
        /// Job id, or the URL the job was probed with.
        target: String,
        /// Stream format to download (default: largest stream).
        #[arg(long)]
        format: Option<String>,
    },

    /// List all jobs with refreshed status.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one job, including its metadata.
    Show {
        /// Job identifier.
        id: String,
    },

    /// Prune queue entries whose job records are incomplete, once.
    Sweep,

    /// Run the periodic queue janitor until interrupted.
    Serve {
        /// Override the sweep interval in seconds.
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let service = JobService::connect(&cfg).await?;

        match cli.command {
            CliCommand::Info { url } => run_info(&service, &url).await?,
            CliCommand::Download { target, format } => {
                run_download(&service, &target, format).await?
            }
            CliCommand::List { json } => run_list(&service, json).await?,
            CliCommand::Show { id } => run_show(&service, &id).await?,
            CliCommand::Sweep => run_sweep(&service, &cfg.janitor).await?,
            CliCommand::Serve { interval } => {
                run_serve(&service, &serve_janitor_config(&cfg.janitor, interval)).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
