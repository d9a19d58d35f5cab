//! Table formatter implementation.
//!
//! Responsibilities:
//! - Render index reports as tab-separated tables in a fixed section
//!   order: status, cells, unknown components, disks, merge events,
//!   health, partial errors.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

use spindex_client::models::SearchApplication;
use spindex_client::report::IndexReport;
use spindex_config::constants::DEFAULT_UPDATE_GROUP;

use super::Formatter;

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_applications(&self, apps: &[SearchApplication]) -> Result<String> {
        if apps.is_empty() {
            return Ok("No search service applications found.\n".to_string());
        }
        let mut output = String::new();
        output.push_str("Id\tName\tConstellation\n");
        for app in apps {
            writeln!(output, "{}\t{}\t{}", app.id, app.name, app.constellation)?;
        }
        Ok(output)
    }

    fn format_reports(
        &self,
        reports: &BTreeMap<String, IndexReport>,
        detailed: bool,
    ) -> Result<String> {
        let mut output = String::new();
        for report in reports.values() {
            format_report(&mut output, report, detailed)?;
        }
        Ok(output)
    }
}

fn mb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}

fn format_report(output: &mut String, report: &IndexReport, detailed: bool) -> Result<()> {
    writeln!(output, "Index report: {}", report.application)?;
    writeln!(output)?;

    match &report.status {
        Some(status) => {
            writeln!(output, "State: {}", status.overall_state)?;
            writeln!(output, "Checked at: {}", status.checked_at.to_rfc3339())?;
        }
        None => {
            // Without a status there is no check time to window against;
            // the partial errors say why.
            writeln!(output, "WARNING: system status is unavailable")?;
            for (endpoint, message) in &report.partial_errors {
                writeln!(output, "WARNING: {} failed: {}", endpoint, message)?;
            }
            writeln!(output)?;
            return Ok(());
        }
    }
    writeln!(output)?;

    let mut cells: Vec<_> = report.cells.iter().collect();
    cells.sort_by_key(|c| (c.partition, c.cell));
    if !cells.is_empty() {
        writeln!(
            output,
            "Component\tServer\tPartition\tCell\tPrimary\tDocs\tGeneration\tCheckpoint\tMerging"
        )?;
        for cell in &cells {
            writeln!(
                output,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                cell.component,
                cell.server,
                cell.partition,
                cell.cell,
                cell.primary,
                cell.active_docs,
                cell.generation,
                cell.checkpoint_size,
                cell.merge_running,
            )?;
        }
        writeln!(output)?;
    }

    if detailed {
        for cell in &cells {
            for process in &cell.processes {
                writeln!(
                    output,
                    "Process: {} pid {} -> {}",
                    process.server, process.pid, cell.component
                )?;
            }
        }
        if cells.iter().any(|c| !c.processes.is_empty()) {
            writeln!(output)?;
        }
    }

    if !report.unknown_components.is_empty() {
        let names: Vec<String> = report
            .unknown_components
            .iter()
            .map(|c| match c.partition {
                Some(partition) => {
                    format!("{} (server {}, partition {})", c.name, c.server, partition)
                }
                None => format!("{} (server {})", c.name, c.server),
            })
            .collect();
        writeln!(
            output,
            "WARNING: components with unknown status: {}",
            names.join(", ")
        )?;
        writeln!(output)?;
    }

    if !report.disks.is_empty() {
        let mut disks: Vec<_> = report.disks.iter().collect();
        disks.sort_by(|a, b| a.component.cmp(&b.component));
        writeln!(output, "Disk usage:")?;
        writeln!(
            output,
            "Server\tComponent\tPath\tSize (MB)\tFree (MB)\tCapacity (MB)"
        )?;
        for disk in disks {
            writeln!(
                output,
                "{}\t{}\t{}\t{}\t{}\t{}",
                disk.server,
                disk.component,
                disk.path,
                mb(disk.size_bytes),
                mb(disk.free_bytes),
                mb(disk.capacity_bytes),
            )?;
        }
        writeln!(output)?;
    }

    let mut events: Vec<_> = report
        .merge_events
        .iter()
        .filter(|e| detailed || e.update_group == DEFAULT_UPDATE_GROUP)
        .collect();
    events.sort_by(|a, b| {
        (&a.component, &a.update_group, a.timestamp).cmp(&(
            &b.component,
            &b.update_group,
            b.timestamp,
        ))
    });
    if !events.is_empty() {
        writeln!(output, "Merge events:")?;
        writeln!(
            output,
            "Time\tComponent\tGroup\tTotal\tMaster\tRatio %\tTarget %"
        )?;
        for event in &events {
            writeln!(
                output,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                event.timestamp,
                event.component,
                event.update_group,
                event.total,
                event.master,
                event.ratio,
                event.target_ratio,
            )?;
        }
        writeln!(output)?;
    }

    let silent = report.components_without_merges();
    if !silent.is_empty() && !report.cells.is_empty() {
        writeln!(
            output,
            "WARNING: no merge events observed for: {}",
            silent.join(", ")
        )?;
        writeln!(output)?;
    }

    if !report.health_entries.is_empty() {
        let mut entries: Vec<_> = report.health_entries.iter().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        writeln!(output, "Admin health:")?;
        writeln!(output, "Name\tLevel\tMessage")?;
        for entry in entries {
            writeln!(output, "{}\t{}\t{}", entry.name, entry.level, entry.message)?;
        }
        writeln!(output)?;
    }

    for (endpoint, message) in &report.partial_errors {
        writeln!(output, "WARNING: {} failed: {}", endpoint, message)?;
    }
    if !report.partial_errors.is_empty() {
        writeln!(output)?;
    }

    if detailed {
        if let Some(status) = &report.status {
            writeln!(output, "Admin component: {}", status.admin_component)?;
            writeln!(output, "Index home: {}", status.index_home)?;
            writeln!(output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use spindex_client::models::SystemStatus;
    use spindex_client::report::{CellReport, MergeEvent, UnknownComponent};

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn cell(component: &str, partition: u32, cell_id: u32) -> CellReport {
        CellReport {
            component: component.to_string(),
            server: "idx-01".to_string(),
            partition,
            cell: cell_id,
            primary: true,
            active_docs: 10,
            generation: 1,
            checkpoint_size: 0,
            merge_running: false,
            merge_events: Vec::new(),
            processes: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    fn event(component: &str, group: &str) -> MergeEvent {
        MergeEvent {
            timestamp: ts("2015-01-01 00:55:00"),
            component: component.to_string(),
            update_group: group.to_string(),
            total: 100,
            master: 50,
            ratio: 50.0,
            target_ratio: 50.0,
        }
    }

    fn report() -> IndexReport {
        IndexReport {
            application: "SSA".to_string(),
            status: Some(SystemStatus {
                overall_state: "Running".to_string(),
                admin_component: "AdminComponent1".to_string(),
                index_home: r"E:\Index".to_string(),
                checked_at: Utc.with_ymd_and_hms(2015, 1, 1, 1, 0, 0).unwrap(),
            }),
            cells: vec![cell("IndexComponent2", 1, 0), cell("IndexComponent1", 0, 0)],
            unknown_components: Vec::new(),
            disks: Vec::new(),
            merge_events: vec![
                event("IndexComponent1", "people"),
                event("IndexComponent1", "default"),
            ],
            health_entries: Vec::new(),
            partial_errors: Vec::new(),
        }
    }

    fn render(report: IndexReport, detailed: bool) -> String {
        let mut reports = BTreeMap::new();
        reports.insert(report.application.clone(), report);
        TableFormatter
            .format_reports(&reports, detailed)
            .unwrap()
    }

    #[test]
    fn cells_render_sorted_by_partition_then_cell() {
        let output = render(report(), false);
        let first = output.find("IndexComponent1\t").unwrap();
        let second = output.find("IndexComponent2\t").unwrap();
        assert!(first < second, "partition 0 must render before partition 1");
    }

    #[test]
    fn merge_table_filters_to_default_group_unless_detailed() {
        let output = render(report(), false);
        assert!(output.contains("\tdefault\t"));
        assert!(!output.contains("\tpeople\t"));

        let output = render(report(), true);
        assert!(output.contains("\tpeople\t"));
    }

    #[test]
    fn detailed_adds_admin_component_and_index_home() {
        let output = render(report(), false);
        assert!(!output.contains("Admin component:"));

        let output = render(report(), true);
        assert!(output.contains("Admin component: AdminComponent1"));
        assert!(output.contains(r"Index home: E:\Index"));
    }

    #[test]
    fn missing_status_warns_and_ends_the_report() {
        let mut r = report();
        r.status = None;
        r.partial_errors
            .push(("system_status".to_string(), "admin endpoint down".to_string()));
        let output = render(r, false);
        assert!(output.contains("WARNING: system status is unavailable"));
        assert!(output.contains("system_status failed: admin endpoint down"));
        assert!(!output.contains("IndexComponent1"), "no cell table without a status");
    }

    #[test]
    fn unknown_component_warning_lists_host_and_partition() {
        let mut r = report();
        r.unknown_components = vec![
            UnknownComponent {
                name: "IndexComponent3".to_string(),
                server: "idx-02".to_string(),
                partition: Some(1),
            },
            UnknownComponent {
                name: "QueryProcessingComponent1".to_string(),
                server: "qry-01".to_string(),
                partition: None,
            },
        ];
        let output = render(r, false);
        assert!(output.contains("IndexComponent3 (server idx-02, partition 1)"));
        assert!(output.contains("QueryProcessingComponent1 (server qry-01)"));
    }

    #[test]
    fn silent_components_are_warned_about() {
        let mut r = report();
        r.merge_events.clear();
        let output = render(r, false);
        assert!(output.contains("WARNING: no merge events observed for:"));
        assert!(output.contains("IndexComponent1"));
    }

    #[test]
    fn megabytes_render_with_one_decimal() {
        assert_eq!(mb(1048576), "1.0");
        assert_eq!(mb(1572864), "1.5");
        assert_eq!(mb(0), "0.0");
    }
}
