//! CLI command implementations.

pub mod apps;
pub mod report;

use anyhow::{Context, Result};
use spindex_client::SearchAdminClient;
use spindex_config::Config;

/// Build the admin client from a loaded configuration.
pub fn build_client_from_config(config: &Config) -> Result<SearchAdminClient> {
    SearchAdminClient::from_config(config).context("Failed to build search admin client")
}
