//! Diagnostic log merge endpoint.
//!
//! The farm-side merge facility collates the diagnostic logs of every
//! server into one text stream, filtered by window start and event ids.
//! It is slow on a large farm, which is why callers gate regeneration
//! behind detailed/extra-report flags and cache the result on disk.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use spindex_config::AuthStrategy;

use crate::auth::apply_auth;
use crate::endpoints::send_request;
use crate::error::Result;

#[derive(Serialize)]
struct MergeRequest<'a> {
    #[serde(rename = "startTime")]
    start_time: DateTime<Utc>,
    #[serde(rename = "eventIds")]
    event_ids: &'a [&'a str],
}

/// Merge diagnostic logs from `start_time` onward, filtered to the
/// given event ids. Returns the merged text, or `None` when no matching
/// events exist (HTTP 204).
pub async fn merge_log_window(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    start_time: DateTime<Utc>,
    event_ids: &[&str],
) -> Result<Option<String>> {
    let url = format!("{}/api/diagnostics/logs/merge", base_url);

    let builder = apply_auth(client.post(&url), auth).json(&MergeRequest {
        start_time,
        event_ids,
    });
    let response = send_request(builder).await?;

    if response.status() == reqwest::StatusCode::NO_CONTENT {
        return Ok(None);
    }

    Ok(Some(response.text().await?))
}
