//! Merge-trigger log line parsing.
//!
//! Exported log windows are plain ULS text. One fixed pattern captures
//! the timestamp, component, update group, and the merge ratios; every
//! non-matching line is silently discarded.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

use super::types::MergeEvent;

static MERGE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})(?:\.\d+)?\s.*?(?P<component>IndexComponent\w*).*?\)\s*(?P<group>\S+), total=(?P<total>\d+), master=(?P<master>\d+), ratio=(?P<ratio>[0-9.]+)%, targetRatio=(?P<target>[0-9.]+)%",
    )
    .expect("merge line pattern is valid")
});

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse every matching line of an exported log window.
pub fn parse_merge_log(text: &str) -> Vec<MergeEvent> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<MergeEvent> {
    let caps = MERGE_LINE_RE.captures(line)?;

    let timestamp = NaiveDateTime::parse_from_str(&caps["ts"], TIMESTAMP_FORMAT).ok()?;

    Some(MergeEvent {
        timestamp,
        component: caps["component"].to_string(),
        update_group: caps["group"].to_string(),
        total: caps["total"].parse().ok()?,
        master: caps["master"].parse().ok()?,
        ratio: caps["ratio"].parse().ok()?,
        target_ratio: caps["target"].parse().ok()?,
    })
}

/// Timestamp of the newest parsed event; becomes the next watermark.
pub fn latest_timestamp(events: &[MergeEvent]) -> Option<NaiveDateTime> {
    events.iter().map(|e| e.timestamp).max()
}

/// Events for one component inside the trailing window of
/// `window_secs` seconds ending at `end`. Events outside the window are
/// presumed already reported or not yet relevant.
pub fn events_for_component(
    events: &[MergeEvent],
    component: &str,
    end: NaiveDateTime,
    window_secs: i64,
) -> Vec<MergeEvent> {
    let start = end - chrono::Duration::seconds(window_secs);
    events
        .iter()
        .filter(|e| e.component == component && e.timestamp > start && e.timestamp <= end)
        .cloned()
        .collect()
}
