//! Report synthesis.
//!
//! Merges collected status and parsed log events into the per-cell and
//! per-host record sequences. Pure construction except for the disk and
//! process probes, which issue remote host queries.

use tracing::{debug, warn};

use super::collector::{CollectedStatus, Metric, master_merge, metric_value};
use super::events::{events_for_component, latest_timestamp};
use super::types::{CellReport, DiskReport, IndexProcess, MergeEvent, UnknownComponent};
use crate::client::SearchAdminClient;
use crate::error::ClientError;
use spindex_config::PathRules;
use spindex_config::constants::{INDEX_PROCESS_NAME, MERGE_EVENT_WINDOW_SECS};

/// Build one cell report per known-state component.
///
/// The event window ends at the system-observed check time; when the
/// status query failed the newest parsed event stands in, so cached
/// events still render something useful.
pub fn build_cell_reports(
    collected: &CollectedStatus,
    events: &[MergeEvent],
) -> Vec<CellReport> {
    let window_end = collected
        .status
        .as_ref()
        .map(|s| s.checked_at.naive_utc())
        .or_else(|| latest_timestamp(events));

    collected
        .known
        .iter()
        .filter(|component| component.is_index_component())
        .map(|component| {
            let empty = Vec::new();
            let health = collected.health.get(&component.name).unwrap_or(&empty);
            let (merge_running, cell) = master_merge(health);

            let merge_events = match window_end {
                Some(end) => events_for_component(
                    events,
                    &component.name,
                    end,
                    MERGE_EVENT_WINDOW_SECS,
                ),
                None => Vec::new(),
            };

            CellReport {
                component: component.name.clone(),
                server: component.server_name.clone(),
                partition: component.partition().unwrap_or(0),
                cell: cell.unwrap_or(0),
                primary: component
                    .details
                    .get("Primary")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
                active_docs: metric_value(health, Metric::ActiveDocs),
                generation: metric_value(health, Metric::Generation),
                checkpoint_size: metric_value(health, Metric::CheckpointSize),
                merge_running,
                merge_events,
                processes: Vec::new(),
                details: component.details.clone(),
            }
        })
        .collect()
}

/// List unknown-state components for the warning block. Every
/// component type is listed; only cell reports are index-specific.
pub fn build_unknown_components(collected: &CollectedStatus) -> Vec<UnknownComponent> {
    collected
        .unknown
        .iter()
        .map(|component| UnknownComponent {
            name: component.name.clone(),
            server: component.server_name.clone(),
            partition: component.partition(),
        })
        .collect()
}

/// Build one disk report per index cell by probing the hosting server.
///
/// The cell folder is the lexicographically last subfolder whose name
/// contains the cell fragment; this mirrors the platform's dated folder
/// naming and is deliberately not "fixed". Reports with a computed size
/// of zero are dropped as inaccessible or not yet provisioned.
pub async fn build_disk_reports(
    client: &SearchAdminClient,
    rules: &PathRules,
    cells: &[CellReport],
) -> (Vec<DiskReport>, Vec<(String, ClientError)>) {
    let mut reports = Vec::new();
    let mut partial_errors = Vec::new();

    for cell in cells {
        let local_root = rules
            .index_root
            .clone()
            .or_else(|| cell.details.get("RootDirectory").cloned());
        let Some(local_root) = local_root else {
            debug!(component = %cell.component, "no root directory known, skipping disk probe");
            continue;
        };

        match probe_cell_disk(client, rules, cell, &local_root).await {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(e) => {
                warn!(component = %cell.component, error = %e, "disk probe failed");
                partial_errors.push((format!("disk:{}", cell.component), e));
            }
        }
    }

    (reports, partial_errors)
}

async fn probe_cell_disk(
    client: &SearchAdminClient,
    rules: &PathRules,
    cell: &CellReport,
    local_root: &str,
) -> crate::error::Result<Option<DiskReport>> {
    let share_root = rules.to_share_path(&cell.server, local_root);
    let fragment = format!("Cell.{}.{}", cell.partition, cell.cell);

    let entries = client.list_files(&cell.server, &share_root, false).await?;
    let mut candidates: Vec<&str> = entries
        .iter()
        .filter(|e| e.is_dir && e.name.contains(&fragment))
        .map(|e| e.path.as_str())
        .collect();
    candidates.sort_unstable();
    let Some(cell_path) = candidates.last().copied() else {
        debug!(component = %cell.component, %fragment, "no matching cell folder");
        return Ok(None);
    };

    let files = client.list_files(&cell.server, cell_path, true).await?;
    let size_bytes: u64 = files.iter().filter(|f| !f.is_dir).map(|f| f.size).sum();
    if size_bytes == 0 {
        debug!(component = %cell.component, path = %cell_path, "zero-size cell folder discarded");
        return Ok(None);
    }

    let drive = local_root
        .chars()
        .next()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "C".to_string());
    let volume = client.get_volume(&cell.server, &drive).await?;

    Ok(Some(DiskReport {
        server: cell.server.clone(),
        component: cell.component.clone(),
        path: cell_path.to_string(),
        size_bytes,
        free_bytes: volume.free,
        capacity_bytes: volume.capacity,
    }))
}

/// Correlate index host processes to cells by command line.
///
/// Re-runnable: each call re-enumerates the hosts and replaces the
/// process lists on the given cells.
pub async fn correlate_processes(
    client: &SearchAdminClient,
    cells: &mut [CellReport],
) -> Vec<(String, ClientError)> {
    let mut partial_errors = Vec::new();

    let mut servers: Vec<String> = cells.iter().map(|c| c.server.clone()).collect();
    servers.sort_unstable();
    servers.dedup();

    for cell in cells.iter_mut() {
        cell.processes.clear();
    }

    for server in servers {
        let processes = match client.list_processes(&server, INDEX_PROCESS_NAME).await {
            Ok(processes) => processes,
            Err(e) => {
                warn!(%server, error = %e, "process enumeration failed");
                partial_errors.push((format!("processes:{}", server), e));
                continue;
            }
        };

        for process in processes {
            let command_line = match client.get_command_line(&server, process.pid).await {
                Ok(command_line) => command_line,
                Err(e) => {
                    warn!(%server, pid = process.pid, error = %e, "command line query failed");
                    partial_errors.push((format!("commandline:{}:{}", server, process.pid), e));
                    continue;
                }
            };

            for cell in cells.iter_mut() {
                if cell.server == server && command_line.contains(&cell.component) {
                    cell.processes.push(IndexProcess {
                        server: server.clone(),
                        pid: process.pid,
                        command_line: command_line.clone(),
                    });
                }
            }
        }
    }

    partial_errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComponentState, HealthReportEntry, SystemStatus, TopologyComponent,
    };
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn component(name: &str, server: &str, state: ComponentState, partition: u32) -> TopologyComponent {
        let mut details = BTreeMap::new();
        details.insert("Partition".to_string(), partition.to_string());
        details.insert("Primary".to_string(), "true".to_string());
        TopologyComponent {
            name: name.to_string(),
            server_name: server.to_string(),
            state,
            details,
        }
    }

    fn health_for(cell: u32) -> Vec<HealthReportEntry> {
        let id = format!("[index system.sp2719a4ea.{}.0]", cell);
        vec![
            HealthReportEntry {
                name: format!("plugin: count of active documents{}", id),
                message: "1000".to_string(),
                level: "Info".to_string(),
            },
            HealthReportEntry {
                name: format!("plugin: newest generation id{}", id),
                message: "42".to_string(),
                level: "Info".to_string(),
            },
            HealthReportEntry {
                name: format!("plugin: master merge running{}", id),
                message: "false".to_string(),
                level: "Info".to_string(),
            },
        ]
    }

    fn collected_with(components: Vec<TopologyComponent>) -> CollectedStatus {
        let mut collected = CollectedStatus {
            status: Some(SystemStatus {
                overall_state: "Running".to_string(),
                admin_component: "AdminComponent1".to_string(),
                index_home: r"C:\SearchIndex".to_string(),
                checked_at: Utc.with_ymd_and_hms(2015, 1, 1, 1, 0, 0).unwrap(),
            }),
            ..Default::default()
        };
        for component in components {
            if component.state.is_known() {
                collected
                    .health
                    .insert(component.name.clone(), health_for(2));
                collected.known.push(component);
            } else {
                collected.unknown.push(component);
            }
        }
        collected
    }

    fn event(t: &str, component: &str) -> MergeEvent {
        MergeEvent {
            timestamp: chrono::NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S").unwrap(),
            component: component.to_string(),
            update_group: "default".to_string(),
            total: 100,
            master: 50,
            ratio: 50.0,
            target_ratio: 50.0,
        }
    }

    #[test]
    fn unknown_components_never_yield_cell_reports() {
        let collected = collected_with(vec![
            component("IndexComponent1", "idx-01", ComponentState::Active, 0),
            component("IndexComponent2", "idx-02", ComponentState::Unknown, 1),
        ]);

        let cells = build_cell_reports(&collected, &[]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].component, "IndexComponent1");

        let unknown = build_unknown_components(&collected);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].name, "IndexComponent2");
        assert_eq!(unknown[0].partition, Some(1));
    }

    #[test]
    fn unknown_components_of_any_type_are_listed() {
        let collected = collected_with(vec![component(
            "QueryProcessingComponent1",
            "qry-01",
            ComponentState::Unknown,
            3,
        )]);
        let unknown = build_unknown_components(&collected);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].name, "QueryProcessingComponent1");
        assert_eq!(unknown[0].partition, Some(3));
        assert!(build_cell_reports(&collected, &[]).is_empty());
    }

    #[test]
    fn non_index_components_yield_no_cell_reports() {
        let collected = collected_with(vec![
            component("IndexComponent1", "idx-01", ComponentState::Active, 0),
            component("QueryProcessingComponent1", "qry-01", ComponentState::Active, 0),
        ]);
        let cells = build_cell_reports(&collected, &[]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].component, "IndexComponent1");
    }

    #[test]
    fn cell_report_carries_metrics_and_cell_id() {
        let collected = collected_with(vec![component(
            "IndexComponent1",
            "idx-01",
            ComponentState::Active,
            0,
        )]);
        let cells = build_cell_reports(&collected, &[]);
        let cell = &cells[0];
        assert_eq!(cell.active_docs, 1000);
        assert_eq!(cell.generation, 42);
        assert_eq!(cell.cell, 2);
        assert!(cell.primary);
        assert!(!cell.merge_running);
    }

    #[test]
    fn merge_events_attach_only_inside_window_and_matching_component() {
        let collected = collected_with(vec![component(
            "IndexComponent1",
            "idx-01",
            ComponentState::Active,
            0,
        )]);
        // checked_at is 01:00:00; window is the trailing 10 minutes.
        let events = vec![
            event("2015-01-01 00:45:00", "IndexComponent1"), // too old
            event("2015-01-01 00:55:00", "IndexComponent1"), // attached
            event("2015-01-01 00:56:00", "IndexComponent9"), // other component
        ];
        let cells = build_cell_reports(&collected, &events);
        assert_eq!(cells[0].merge_events.len(), 1);
        assert_eq!(
            cells[0].merge_events[0].timestamp,
            chrono::NaiveDateTime::parse_from_str("2015-01-01 00:55:00", "%Y-%m-%d %H:%M:%S")
                .unwrap()
        );
    }

    #[test]
    fn identical_inputs_synthesize_identical_reports() {
        let collected = collected_with(vec![
            component("IndexComponent1", "idx-01", ComponentState::Active, 0),
            component("IndexComponent2", "idx-02", ComponentState::Active, 1),
        ]);
        let events = vec![event("2015-01-01 00:55:00", "IndexComponent1")];
        let first = build_cell_reports(&collected, &events);
        let second = build_cell_reports(&collected, &events);
        assert_eq!(first, second);
    }
}
