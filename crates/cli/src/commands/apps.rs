//! Apps command implementation.

use anyhow::Result;
use tracing::info;

use crate::formatters::{OutputFormat, get_formatter};

pub async fn run(config: spindex_config::Config, output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;

    let client = crate::commands::build_client_from_config(&config)?;
    info!("Connecting to {}", client.base_url());

    let apps = client.list_applications().await?;

    let formatter = get_formatter(format);
    print!("{}", formatter.format_applications(&apps)?);
    Ok(())
}
