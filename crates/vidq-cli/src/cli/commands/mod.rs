//! CLI command handlers, one file per command.

mod download;
mod info;
mod list;
mod serve;
mod show;
mod sweep;

pub use download::run_download;
pub use info::run_info;
pub use list::run_list;
pub use serve::{run_serve, serve_janitor_config};
pub use show::run_show;
pub use sweep::run_sweep;
