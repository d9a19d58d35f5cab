//! Search application enumeration endpoint.

use reqwest::Client;
use spindex_config::AuthStrategy;

use crate::auth::apply_auth;
use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::models::{ApplicationListResponse, SearchApplication};

/// List every search service application in the farm.
pub async fn list_applications(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
) -> Result<Vec<SearchApplication>> {
    let url = format!("{}/api/search/applications", base_url);

    let builder = apply_auth(client.get(&url), auth);
    let response = send_request(builder).await?;

    let resp: ApplicationListResponse = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse application list: {}", e))
    })?;

    Ok(resp.applications)
}
