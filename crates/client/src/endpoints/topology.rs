//! Topology and system status endpoints.

use reqwest::Client;
use spindex_config::AuthStrategy;
use uuid::Uuid;

use crate::auth::apply_auth;
use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::models::{SystemStatus, TopologyComponent, TopologyResponse};

/// Get the overall status of one search application.
pub async fn get_system_status(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    app_id: Uuid,
) -> Result<SystemStatus> {
    let url = format!("{}/api/search/applications/{}/status", base_url, app_id);

    let builder = apply_auth(client.get(&url), auth);
    let response = send_request(builder).await?;

    response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse system status: {}", e))
    })
}

/// Get the topology component list of one search application.
pub async fn get_topology(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    app_id: Uuid,
) -> Result<Vec<TopologyComponent>> {
    let url = format!("{}/api/search/applications/{}/topology", base_url, app_id);

    let builder = apply_auth(client.get(&url), auth);
    let response = send_request(builder).await?;

    let resp: TopologyResponse = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse topology: {}", e)))?;

    Ok(resp.components)
}
