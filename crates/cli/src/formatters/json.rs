//! JSON formatter implementation.
//!
//! Emits the raw report aggregates unmodified, for scripting and for
//! feeding other tools. The `detailed` flag only affects table output.

use anyhow::Result;
use std::collections::BTreeMap;

use spindex_client::models::SearchApplication;
use spindex_client::report::IndexReport;

use super::Formatter;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_applications(&self, apps: &[SearchApplication]) -> Result<String> {
        Ok(serde_json::to_string_pretty(apps)?)
    }

    fn format_reports(
        &self,
        reports: &BTreeMap<String, IndexReport>,
        _detailed: bool,
    ) -> Result<String> {
        // One target serializes bare; several as a name-keyed map.
        if reports.len() == 1 {
            if let Some(report) = reports.values().next() {
                return Ok(serde_json::to_string_pretty(report)?);
            }
        }
        Ok(serde_json::to_string_pretty(reports)?)
    }
}
