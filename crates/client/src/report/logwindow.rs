//! Windowed diagnostic-log export cache.
//!
//! Each log category keeps at most one exported file per constellation
//! under the system temp dir. A cached export is reused while its
//! last-write time is newer than the requested window start; anything
//! older is pruned. Regeneration invokes the farm-side merge facility,
//! which is slow, so callers opt into it explicitly.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

use crate::client::SearchAdminClient;
use crate::error::Result;
use spindex_config::constants::{
    LOG_CACHE_DIR_NAME, MERGE_EXIT_EVENT_IDS, MERGE_TRIGGER_EVENT_IDS,
};

/// One cached diagnostic-log category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    MergeTriggers,
    MergeExits,
}

impl LogCategory {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::MergeTriggers => "merge-triggers",
            Self::MergeExits => "merge-exits",
        }
    }

    pub fn event_ids(self) -> &'static [&'static str] {
        match self {
            Self::MergeTriggers => MERGE_TRIGGER_EVENT_IDS,
            Self::MergeExits => MERGE_EXIT_EVENT_IDS,
        }
    }
}

/// Cache folder for one (constellation, category) pair.
pub fn cache_dir(constellation: &str, category: LogCategory) -> PathBuf {
    std::env::temp_dir()
        .join(LOG_CACHE_DIR_NAME)
        .join(constellation)
        .join(category.dir_name())
}

/// Find a cached export fresher than `window_start`, pruning older
/// siblings so the cache never holds more than one file.
///
/// Returns `None` when the folder is missing, empty, or only holds
/// stale exports.
pub fn find_fresh(dir: &Path, window_start: DateTime<Utc>) -> std::io::Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            files.push((metadata.modified()?, entry.path()));
        }
    }
    files.sort_by(|a, b| b.0.cmp(&a.0));

    let Some((newest_mtime, newest)) = files.first().cloned() else {
        return Ok(None);
    };

    if newest_mtime <= SystemTime::from(window_start) {
        debug!(path = %newest.display(), "cached log export is stale");
        return Ok(None);
    }

    for (_, stale) in &files[1..] {
        debug!(path = %stale.display(), "pruning superseded log export");
        fs::remove_file(stale)?;
    }
    Ok(Some(newest))
}

/// Locate a log export covering at least the window, regenerating it
/// through the merge facility when the caller opted in.
///
/// Returns `None` when no fresh export exists and either generation was
/// not requested or the merge produced no matching events; downstream
/// treats that as "no events in this window".
pub async fn locate_or_generate(
    client: &SearchAdminClient,
    constellation: &str,
    category: LogCategory,
    window_start: DateTime<Utc>,
    generate: bool,
) -> Result<Option<PathBuf>> {
    let dir = cache_dir(constellation, category);

    if let Some(path) = find_fresh(&dir, window_start)? {
        debug!(path = %path.display(), "reusing cached log export");
        return Ok(Some(path));
    }

    if !generate {
        return Ok(None);
    }

    fs::create_dir_all(&dir)?;

    info!(category = category.dir_name(), %window_start, "regenerating log export");
    let Some(text) = client.merge_log_window(window_start, category.event_ids()).await? else {
        return Ok(None);
    };

    let filename = format!(
        "{}-{}.log",
        category.dir_name(),
        Utc::now().format("%Y%m%d%H%M%S%3f")
    );
    let path = dir.join(filename);
    fs::write(&path, text)?;

    // The fresh export supersedes everything else in the folder.
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.path() != path && entry.metadata()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fresh_export_is_reused_and_older_siblings_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let older = dir.path().join("merge-triggers-1.log");
        let newer = dir.path().join("merge-triggers-2.log");
        fs::write(&older, "old").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&newer, "new").unwrap();

        let window_start = Utc::now() - Duration::hours(1);
        let found = find_fresh(dir.path(), window_start).unwrap();
        assert_eq!(found, Some(newer));
        assert!(!older.exists(), "stale sibling must be deleted");
    }

    #[test]
    fn stale_export_yields_none_without_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let only = dir.path().join("merge-triggers-1.log");
        fs::write(&only, "old").unwrap();

        // Window starts in the future, so nothing on disk can be fresh.
        let window_start = Utc::now() + Duration::hours(1);
        let found = find_fresh(dir.path(), window_start).unwrap();
        assert_eq!(found, None);
        assert!(only.exists(), "the newest export is kept even when stale");
    }

    #[test]
    fn missing_folder_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert_eq!(find_fresh(&missing, Utc::now()).unwrap(), None);
    }

    #[test]
    fn cache_dir_is_namespaced_by_constellation_and_category() {
        let dir = cache_dir("sp2719a4ea", LogCategory::MergeTriggers);
        let s = dir.to_string_lossy();
        assert!(s.contains(LOG_CACHE_DIR_NAME));
        assert!(s.contains("sp2719a4ea"));
        assert!(s.ends_with("merge-triggers"));
    }
}
