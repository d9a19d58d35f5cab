//! Status collection.
//!
//! Fetches system status, topology, and per-component health for one
//! resolved application. Each query is independently fallible: a failed
//! query is recorded as a partial error and the dependent fields stay
//! empty, degrading the report instead of aborting it.

use std::collections::BTreeMap;
use tracing::warn;

use crate::client::SearchAdminClient;
use crate::error::ClientError;
use crate::models::{HealthReportEntry, SearchApplication, SystemStatus, TopologyComponent};

/// Stable identifiers for the health metrics a cell report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ActiveDocs,
    CheckpointSize,
    Generation,
}

/// Lookup table from metric id to the health-entry name prefix that
/// carries it. Built once; the collector never dispatches on raw
/// strings elsewhere.
const METRIC_PREFIXES: &[(Metric, &str)] = &[
    (Metric::ActiveDocs, "plugin: count of active documents"),
    (Metric::CheckpointSize, "plugin: checkpoint size"),
    (Metric::Generation, "plugin: newest generation id"),
];

/// Prefix of the health entry reporting a running master merge. Its
/// name embeds the dotted cell identifier in brackets.
const MASTER_MERGE_PREFIX: &str = "plugin: master merge running";

/// Everything the collector produced for one application.
#[derive(Debug, Default)]
pub struct CollectedStatus {
    pub status: Option<SystemStatus>,
    /// Components with a usable state, in topology order.
    pub known: Vec<TopologyComponent>,
    /// Components whose state is Unknown; reported separately.
    pub unknown: Vec<TopologyComponent>,
    /// Health report per known component name.
    pub health: BTreeMap<String, Vec<HealthReportEntry>>,
    /// Raw health report of the admin component.
    pub admin_health: Vec<HealthReportEntry>,
    pub partial_errors: Vec<(String, ClientError)>,
}

/// Collect status, topology, and health for one application.
///
/// Never fails as a whole: a dead admin endpoint yields a
/// `CollectedStatus` with `status: None` and the failure recorded.
pub async fn collect(client: &SearchAdminClient, app: &SearchApplication) -> CollectedStatus {
    let mut collected = CollectedStatus::default();

    match client.get_system_status(app.id).await {
        Ok(status) => collected.status = Some(status),
        Err(e) => {
            warn!(application = %app.name, error = %e, "system status query failed");
            collected.partial_errors.push(("system_status".to_string(), e));
        }
    }

    let components = match client.get_topology(app.id).await {
        Ok(components) => components,
        Err(e) => {
            warn!(application = %app.name, error = %e, "topology query failed");
            collected.partial_errors.push(("topology".to_string(), e));
            return collected;
        }
    };

    // Disjoint partition by the state predicate; both sets are kept.
    for component in components {
        if component.state.is_known() {
            collected.known.push(component);
        } else {
            collected.unknown.push(component);
        }
    }

    // Health is only consulted for index components and the admin
    // component; other component types carry no cell metrics.
    for component in collected.known.iter().filter(|c| c.is_index_component()) {
        match client.get_component_health(app.id, &component.name).await {
            Ok(entries) => {
                collected.health.insert(component.name.clone(), entries);
            }
            Err(e) => {
                warn!(component = %component.name, error = %e, "health query failed");
                collected
                    .partial_errors
                    .push((format!("health:{}", component.name), e));
            }
        }
    }

    if let Some(status) = &collected.status {
        match client.get_component_health(app.id, &status.admin_component).await {
            Ok(entries) => collected.admin_health = entries,
            Err(e) => {
                warn!(component = %status.admin_component, error = %e, "admin health query failed");
                collected.partial_errors.push(("admin_health".to_string(), e));
            }
        }
    }

    collected
}

/// Extract one numeric metric from a component's health entries by
/// prefix match. Absent entries and unparseable messages yield 0.
pub fn metric_value(entries: &[HealthReportEntry], metric: Metric) -> u64 {
    let prefix = METRIC_PREFIXES
        .iter()
        .find(|(m, _)| *m == metric)
        .map(|(_, p)| *p)
        .unwrap_or_default();

    entries
        .iter()
        .find(|e| e.name.starts_with(prefix))
        .and_then(|e| e.message.trim().parse().ok())
        .unwrap_or(0)
}

/// Extract the merge-in-progress flag and the cell id from the master
/// merge plugin entry. The cell id is the third dot-segment of the
/// bracketed identifier, e.g. `[index system.sp2719a4ea.2.0]` -> 2.
pub fn master_merge(entries: &[HealthReportEntry]) -> (bool, Option<u32>) {
    let Some(entry) = entries.iter().find(|e| e.name.starts_with(MASTER_MERGE_PREFIX)) else {
        return (false, None);
    };

    let running = entry.message.trim().eq_ignore_ascii_case("true");

    let cell = entry
        .name
        .split_once('[')
        .and_then(|(_, rest)| rest.split_once(']'))
        .map(|(id, _)| id)
        .and_then(|id| id.split('.').nth(2))
        .and_then(|segment| segment.parse().ok());

    (running, cell)
}
