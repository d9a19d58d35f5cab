//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use spindex_config::Config;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Apps => {
            commands::apps::run(config, &cli.output).await?;
        }
        Commands::Report {
            targets,
            detailed,
            disk_reports,
            extra_log_reports,
            collect_only,
        } => {
            commands::report::run(
                config,
                targets,
                detailed,
                disk_reports,
                extra_log_reports,
                collect_only,
                &cli.output,
            )
            .await?;
        }
    }
    Ok(())
}
