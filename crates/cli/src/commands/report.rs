//! Report command implementation.

use anyhow::Result;
use tracing::{info, warn};

use spindex_client::report::{ReportOptions, TargetSelector, run_reports};

use crate::formatters::{OutputFormat, get_formatter};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: spindex_config::Config,
    targets: Vec<String>,
    detailed: bool,
    disk_reports: bool,
    extra_log_reports: bool,
    collect_only: bool,
    output_format: &str,
) -> Result<()> {
    // Validate the format before any farm traffic.
    let format = OutputFormat::from_str(output_format)?;

    let client = crate::commands::build_client_from_config(&config)?;
    info!("Connecting to {}", client.base_url());

    let selectors: Vec<TargetSelector> =
        targets.iter().map(|t| TargetSelector::parse(t)).collect();
    let options = ReportOptions {
        detailed,
        disk_reports,
        extra_log_reports,
    };

    let reports = run_reports(&client, &config.paths, &selectors, options).await?;

    for (application, report) in &reports {
        for (endpoint, message) in &report.partial_errors {
            warn!(%application, "{} failed: {}", endpoint, message);
        }
    }

    if collect_only {
        info!("Collected {} report(s); rendering skipped", reports.len());
        return Ok(());
    }

    let formatter = get_formatter(format);
    print!("{}", formatter.format_reports(&reports, detailed)?);
    Ok(())
}
