//! Output formatters for CLI commands.
//!
//! Two formats: the human-oriented table rendering and raw JSON of the
//! report aggregates for scripting.

mod json;
mod table;

use anyhow::Result;
use std::collections::BTreeMap;

use spindex_client::models::SearchApplication;
use spindex_client::report::IndexReport;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: table, json", s),
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format the application list.
    fn format_applications(&self, apps: &[SearchApplication]) -> Result<String>;

    /// Format the per-application index reports.
    fn format_reports(&self, reports: &BTreeMap<String, IndexReport>, detailed: bool)
    -> Result<String>;
}

/// Get the formatter for the requested output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("xml").is_err());
    }
}
