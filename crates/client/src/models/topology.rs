//! Topology and system status models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a topology component.
///
/// States the reporting pipeline does not treat specially are preserved
/// verbatim in `Other` so they still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentState {
    Active,
    Unknown,
    Other(String),
}

impl ComponentState {
    /// Whether the component reported a usable state. Unknown-state
    /// components are excluded from cell reports and listed in the
    /// unknown-status warning instead.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<String> for ComponentState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => Self::Active,
            "Unknown" => Self::Unknown,
            _ => Self::Other(s),
        }
    }
}

impl From<ComponentState> for String {
    fn from(state: ComponentState) -> Self {
        match state {
            ComponentState::Active => "Active".to_string(),
            ComponentState::Unknown => "Unknown".to_string(),
            ComponentState::Other(s) => s,
        }
    }
}

/// One named unit of the search subsystem.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TopologyComponent {
    pub name: String,
    #[serde(rename = "serverName")]
    pub server_name: String,
    pub state: ComponentState,
    /// Flat detail pairs reported by the admin endpoint. "Partition"
    /// and "Primary" are interpreted by the synthesizer; everything
    /// else passes through as opaque strings.
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl TopologyComponent {
    /// Partition number from the detail pairs, when present.
    pub fn partition(&self) -> Option<u32> {
        self.details.get("Partition").and_then(|v| v.parse().ok())
    }

    /// Whether this component hosts an index partition.
    pub fn is_index_component(&self) -> bool {
        self.name.starts_with("IndexComponent")
    }
}

/// Response wrapper for the topology endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TopologyResponse {
    pub components: Vec<TopologyComponent>,
}

/// Overall status of one search application.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SystemStatus {
    /// Overall reported state, e.g. "Running".
    #[serde(rename = "overallState")]
    pub overall_state: String,
    /// Name of the primary search administration component.
    #[serde(rename = "adminComponent")]
    pub admin_component: String,
    /// On-disk home directory of the index, as reported by the admin
    /// component.
    #[serde(rename = "indexHome")]
    pub index_home: String,
    /// Most recent system-observed check time. Merge-trigger events are
    /// attached to cells only inside a trailing window ending here.
    #[serde(rename = "checkedAt")]
    pub checked_at: DateTime<Utc>,
}
