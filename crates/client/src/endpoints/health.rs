//! Component health report endpoint.

use reqwest::Client;
use spindex_config::AuthStrategy;
use uuid::Uuid;

use crate::auth::apply_auth;
use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::models::{HealthReportEntry, HealthReportResponse};

/// Get the flat name/message/level health report for one component.
pub async fn get_component_health(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    app_id: Uuid,
    component: &str,
) -> Result<Vec<HealthReportEntry>> {
    let url = format!(
        "{}/api/search/applications/{}/components/{}/health",
        base_url, app_id, component
    );

    let builder = apply_auth(client.get(&url), auth);
    let response = send_request(builder).await?;

    let resp: HealthReportResponse = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse health report: {}", e))
    })?;

    Ok(resp.entries)
}
