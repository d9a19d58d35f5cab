//! Component health report models.

use serde::{Deserialize, Serialize};

/// One entry of a component health report: a flat name/message/level
/// triple. Names follow the platform's `plugin: <metric>[<dotted id>]`
/// convention and are matched by prefix.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthReportEntry {
    pub name: String,
    pub message: String,
    pub level: String,
}

/// Response wrapper for the component health endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthReportResponse {
    pub entries: Vec<HealthReportEntry>,
}
