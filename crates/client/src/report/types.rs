//! Report record types produced by the pipeline.
//!
//! All of these are plain immutable data once built; the synthesizer
//! constructs each sequence in one ordered pass. They serialize so the
//! CLI can emit the raw aggregate as JSON instead of rendering tables.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{HealthReportEntry, SystemStatus};

/// One parsed merge-trigger (or merge-exit) log event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeEvent {
    pub timestamp: NaiveDateTime,
    pub component: String,
    pub update_group: String,
    pub total: u64,
    pub master: u64,
    pub ratio: f64,
    pub target_ratio: f64,
}

/// One index host process correlated to a component by its command
/// line. Re-run `synth::correlate_processes` to refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexProcess {
    pub server: String,
    pub pid: u32,
    pub command_line: String,
}

/// Per-cell merge/health summary for one known-state component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub component: String,
    pub server: String,
    pub partition: u32,
    pub cell: u32,
    pub primary: bool,
    pub active_docs: u64,
    pub generation: u64,
    pub checkpoint_size: u64,
    pub merge_running: bool,
    /// Merge-trigger events for this component inside the trailing
    /// report window.
    pub merge_events: Vec<MergeEvent>,
    pub processes: Vec<IndexProcess>,
    /// Opaque detail pairs passed through from the topology component.
    pub details: BTreeMap<String, String>,
}

/// A component whose state could not be determined. Listed once in the
/// unknown-status warning; never produces a cell report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownComponent {
    pub name: String,
    pub server: String,
    pub partition: Option<u32>,
}

/// Per-host storage usage summary for one index component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskReport {
    pub server: String,
    pub component: String,
    pub path: String,
    pub size_bytes: u64,
    pub free_bytes: u64,
    pub capacity_bytes: u64,
}

/// The full aggregate for one search application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReport {
    pub application: String,
    /// `None` when the status/topology query failed; the renderer then
    /// warns and skips the dependent sections.
    pub status: Option<SystemStatus>,
    pub cells: Vec<CellReport>,
    pub unknown_components: Vec<UnknownComponent>,
    pub disks: Vec<DiskReport>,
    /// Every merge event parsed from the cached log windows, unfiltered.
    pub merge_events: Vec<MergeEvent>,
    /// Raw health report of the admin component.
    pub health_entries: Vec<HealthReportEntry>,
    /// Endpoint-name/error pairs for queries that failed without
    /// aborting the report.
    pub partial_errors: Vec<(String, String)>,
}

impl IndexReport {
    /// Names of components that have a cell report but no merge event
    /// at all. Surfaced as a warning since an index partition that
    /// never merges is usually stuck.
    pub fn components_without_merges(&self) -> Vec<String> {
        self.cells
            .iter()
            .filter(|c| {
                !self
                    .merge_events
                    .iter()
                    .any(|e| e.component == c.component)
            })
            .map(|c| c.component.clone())
            .collect()
    }
}
