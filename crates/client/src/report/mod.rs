//! Index report pipeline.
//!
//! Responsibilities:
//! - Resolve caller-supplied targets to search applications.
//! - Collect status, topology, and health per application.
//! - Extract windowed merge events from cached diagnostic log exports.
//! - Synthesize the per-cell, per-host, and disk record sequences.
//!
//! Invariants:
//! - A report for one application degrades on query failures; it only
//!   fails as a whole when target resolution itself fails.
//! - A session re-run within the staleness window returns the cached
//!   aggregate unchanged.

pub mod collector;
pub mod events;
pub mod logwindow;
pub mod resolver;
pub mod synth;
pub mod types;

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDateTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::client::SearchAdminClient;
use crate::error::Result;
use crate::models::SearchApplication;
use spindex_config::PathRules;
use spindex_config::constants::{DEFAULT_LOG_WINDOW_SECS, REPORT_STALENESS};

pub use logwindow::LogCategory;
pub use resolver::{TargetSelector, resolve_targets};
pub use types::{
    CellReport, DiskReport, IndexProcess, IndexReport, MergeEvent, UnknownComponent,
};

/// What the caller asked the pipeline to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include process correlation and render every update group.
    pub detailed: bool,
    /// Probe index hosts for per-cell folder sizes and volume usage.
    /// Detailed mode implies this.
    pub disk_reports: bool,
    /// Also export and parse the merge-exit log window.
    pub extra_log_reports: bool,
}

impl ReportOptions {
    /// Whether a missing log export may be regenerated through the
    /// farm-side merge facility. Regeneration is slow, so the plain
    /// report only reuses exports someone else already paid for.
    fn may_generate_logs(&self) -> bool {
        self.detailed || self.extra_log_reports
    }
}

/// A re-runnable report handle for one search application.
///
/// Holds the event watermark and the freshness-cached aggregate across
/// runs, so interactive callers can poll without re-collecting.
#[derive(Debug)]
pub struct ReportSession {
    app: SearchApplication,
    /// Timestamp of the newest event seen so far; the next run requests
    /// the log window starting here.
    last_event_check: Option<NaiveDateTime>,
    cached: Option<(Instant, ReportOptions, IndexReport)>,
}

impl ReportSession {
    pub fn new(app: SearchApplication) -> Self {
        Self {
            app,
            last_event_check: None,
            cached: None,
        }
    }

    pub fn application(&self) -> &SearchApplication {
        &self.app
    }

    /// Timestamp of the newest merge event any run of this session has
    /// parsed so far.
    pub fn last_event_check(&self) -> Option<NaiveDateTime> {
        self.last_event_check
    }

    /// Produce the report, reusing the cached aggregate while it is
    /// fresh and was built with the same options.
    pub async fn run(
        &mut self,
        client: &SearchAdminClient,
        rules: &PathRules,
        options: ReportOptions,
    ) -> Result<IndexReport> {
        if let Some((built_at, cached_options, report)) = &self.cached {
            if *cached_options == options && built_at.elapsed() < REPORT_STALENESS {
                debug!(application = %self.app.name, "returning cached report");
                return Ok(report.clone());
            }
        }

        let report = self.collect_fresh(client, rules, options).await?;
        self.cached = Some((Instant::now(), options, report.clone()));
        Ok(report)
    }

    async fn collect_fresh(
        &mut self,
        client: &SearchAdminClient,
        rules: &PathRules,
        options: ReportOptions,
    ) -> Result<IndexReport> {
        info!(application = %self.app.name, "collecting index report");

        let collected = collector::collect(client, &self.app).await;

        let window_start = match self.last_event_check {
            Some(watermark) => Utc.from_utc_datetime(&watermark),
            None => Utc::now() - chrono::Duration::seconds(DEFAULT_LOG_WINDOW_SECS),
        };

        let mut merge_events = self
            .load_events(
                client,
                LogCategory::MergeTriggers,
                window_start,
                options.may_generate_logs(),
            )
            .await?;
        if options.extra_log_reports {
            merge_events.extend(
                self.load_events(client, LogCategory::MergeExits, window_start, true)
                    .await?,
            );
        }

        let mut cells = synth::build_cell_reports(&collected, &merge_events);
        let unknown_components = synth::build_unknown_components(&collected);

        let mut partial_errors: Vec<(String, String)> = collected
            .partial_errors
            .iter()
            .map(|(name, e)| (name.clone(), e.to_string()))
            .collect();

        if options.detailed {
            for (name, e) in synth::correlate_processes(client, &mut cells).await {
                partial_errors.push((name, e.to_string()));
            }
        }

        let disks = if options.disk_reports || options.detailed {
            let (disks, errors) = synth::build_disk_reports(client, rules, &cells).await;
            for (name, e) in errors {
                partial_errors.push((name, e.to_string()));
            }
            disks
        } else {
            Vec::new()
        };

        // The newest parsed event becomes the watermark; when nothing
        // parsed, the previous watermark stands so no gap opens up.
        if let Some(latest) = events::latest_timestamp(&merge_events) {
            self.last_event_check = Some(latest);
        }

        Ok(IndexReport {
            application: self.app.name.clone(),
            status: collected.status,
            cells,
            unknown_components,
            disks,
            merge_events,
            health_entries: collected.admin_health,
            partial_errors,
        })
    }

    async fn load_events(
        &self,
        client: &SearchAdminClient,
        category: LogCategory,
        window_start: chrono::DateTime<Utc>,
        generate: bool,
    ) -> Result<Vec<MergeEvent>> {
        let path = logwindow::locate_or_generate(
            client,
            &self.app.constellation,
            category,
            window_start,
            generate,
        )
        .await?;

        let Some(path) = path else {
            debug!(category = category.dir_name(), "no log export available");
            return Ok(Vec::new());
        };

        let text = std::fs::read_to_string(&path)?;
        let events = events::parse_merge_log(&text);
        debug!(
            category = category.dir_name(),
            count = events.len(),
            "parsed log export"
        );
        Ok(events)
    }
}

/// Run the full pipeline for every resolved target.
///
/// Target resolution errors (nothing in the farm, ambiguous choice)
/// propagate; a failure while reporting on one resolved application is
/// logged and that application is skipped.
pub async fn run_reports(
    client: &SearchAdminClient,
    rules: &PathRules,
    selectors: &[TargetSelector],
    options: ReportOptions,
) -> Result<BTreeMap<String, IndexReport>> {
    let applications = resolver::resolve_targets(client, selectors).await?;

    let mut reports = BTreeMap::new();
    for app in applications {
        let name = app.name.clone();
        let mut session = ReportSession::new(app);
        match session.run(client, rules, options).await {
            Ok(report) => {
                reports.insert(name, report);
            }
            Err(e) => warn!(application = %name, error = %e, "report failed, skipping"),
        }
    }
    Ok(reports)
}
