//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not handle config loading (see `main()`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spindex")]
#[command(about = "spindex - SharePoint Search index health reports from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  spindex apps\n  spindex report\n  spindex report 'Search Service Application' --detailed\n  spindex report --disk-reports --output json\n  spindex --profile production report --collect-only\n"
)]
pub struct Cli {
    /// Base URL of the search admin endpoint (e.g., https://admin-host:9443)
    #[arg(short, long, global = true, env = "SPINDEX_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for basic authentication
    #[arg(short, long, global = true, env = "SPINDEX_USERNAME")]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, global = true, env = "SPINDEX_PASSWORD")]
    pub password: Option<String>,

    /// API token for authentication (preferred over username/password)
    #[arg(short, long, global = true, env = "SPINDEX_API_TOKEN")]
    pub api_token: Option<String>,

    /// Connection timeout in seconds
    #[arg(long, global = true, env = "SPINDEX_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "SPINDEX_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Profile name to load from the profiles file
    #[arg(long, global = true, env = "SPINDEX_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom profiles file (overrides default location)
    #[arg(long, global = true, env = "SPINDEX_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Explicit index root directory, overriding what components report
    #[arg(long, global = true, env = "SPINDEX_INDEX_ROOT")]
    pub index_root: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List search service applications in the farm
    Apps,

    /// Produce index health reports
    Report {
        /// Applications to report on, by name or id (default: the
        /// farm's only application)
        targets: Vec<String>,

        /// Include process correlation, every update group, and extra
        /// status lines
        #[arg(short, long)]
        detailed: bool,

        /// Probe index hosts for per-cell folder sizes and volume usage
        #[arg(long)]
        disk_reports: bool,

        /// Also export and parse the merge-exit log window
        #[arg(long)]
        extra_log_reports: bool,

        /// Collect and cache the reports without rendering them
        #[arg(long)]
        collect_only: bool,
    },
}
