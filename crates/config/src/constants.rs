//! Centralized constants for the spindex workspace.
//!
//! Default values shared across crates to avoid magic number
//! duplication.

use std::time::Duration;

// =============================================================================
// Connection defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

// =============================================================================
// Report pipeline windows
// =============================================================================

/// How long a collected report stays fresh on its handle before a new
/// collection pass is required.
pub const REPORT_STALENESS: Duration = Duration::from_secs(15 * 60);

/// Trailing window, ending at the most recent system check time, inside
/// which merge-trigger events are attached to cell reports. Older events
/// are presumed already reported.
pub const MERGE_EVENT_WINDOW_SECS: i64 = 10 * 60;

// =============================================================================
// Diagnostic log extraction
// =============================================================================

/// ULS event ids marking the start of a master merge.
pub const MERGE_TRIGGER_EVENT_IDS: &[&str] = &["ajhl2"];

/// ULS event ids marking the end of a master merge.
pub const MERGE_EXIT_EVENT_IDS: &[&str] = &["ajhl3"];

/// Directory name under the system temp dir holding exported log
/// windows, namespaced further by constellation and category.
pub const LOG_CACHE_DIR_NAME: &str = "spindex-logs";

/// Log window requested on the first collection pass, before any event
/// watermark exists.
pub const DEFAULT_LOG_WINDOW_SECS: i64 = 3600;

// =============================================================================
// Host probing
// =============================================================================

/// Name of the search index host process whose command lines are
/// correlated against component names.
pub const INDEX_PROCESS_NAME: &str = "noderunner";

/// Default template mapping a component-local path to an administrative
/// share. `{server}` and `{drive}` are substituted.
pub const DEFAULT_SHARE_FORMAT: &str = r"\\{server}\{drive}$";

// =============================================================================
// Rendering
// =============================================================================

/// Update group shown in the merge-event table unless detailed output
/// is requested.
pub const DEFAULT_UPDATE_GROUP: &str = "default";
