//! Main search admin API client.

use std::time::Duration;
use uuid::Uuid;

use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{
    HealthReportEntry, ProcessInfo, RemoteFile, SearchApplication, SystemStatus,
    TopologyComponent, VolumeInfo,
};
use chrono::{DateTime, Utc};
use spindex_config::{AuthStrategy, Config};

/// Builder for creating a new SearchAdminClient.
pub struct SearchAdminClientBuilder {
    base_url: Option<String>,
    auth: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
}

impl Default for SearchAdminClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth: None,
            skip_verify: false,
            timeout: Duration::from_secs(spindex_config::constants::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchAdminClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the admin endpoint.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy.
    pub fn auth(mut self, auth: AuthStrategy) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Normalize a base URL by removing trailing slashes, preventing
    /// double slashes when concatenating endpoint paths.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    pub fn build(self) -> Result<SearchAdminClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let auth = self
            .auth
            .ok_or_else(|| ClientError::AuthFailed("auth strategy is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(5));

        if self.skip_verify && base_url.starts_with("https://") {
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }

        let http = http_builder.build()?;

        Ok(SearchAdminClient {
            http,
            base_url,
            auth,
        })
    }
}

/// Search admin API client.
///
/// A thin, typed wrapper around the farm's administrative REST surface.
/// Each method issues exactly one request.
#[derive(Debug)]
pub struct SearchAdminClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthStrategy,
}

impl SearchAdminClient {
    /// Create a new client builder.
    pub fn builder() -> SearchAdminClientBuilder {
        SearchAdminClientBuilder::new()
    }

    /// Build a client straight from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder()
            .base_url(config.connection.base_url.clone())
            .auth(config.auth.clone())
            .skip_verify(config.connection.skip_verify)
            .timeout(config.connection.timeout)
            .build()
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every search service application in the farm.
    pub async fn list_applications(&self) -> Result<Vec<SearchApplication>> {
        endpoints::list_applications(&self.http, &self.base_url, &self.auth).await
    }

    /// Get the overall status of one search application.
    pub async fn get_system_status(&self, app_id: Uuid) -> Result<SystemStatus> {
        endpoints::get_system_status(&self.http, &self.base_url, &self.auth, app_id).await
    }

    /// Get the topology component list of one search application.
    pub async fn get_topology(&self, app_id: Uuid) -> Result<Vec<TopologyComponent>> {
        endpoints::get_topology(&self.http, &self.base_url, &self.auth, app_id).await
    }

    /// Get the health report for one component.
    pub async fn get_component_health(
        &self,
        app_id: Uuid,
        component: &str,
    ) -> Result<Vec<HealthReportEntry>> {
        endpoints::get_component_health(&self.http, &self.base_url, &self.auth, app_id, component)
            .await
    }

    /// List processes with the given image name on a remote host.
    pub async fn list_processes(
        &self,
        server: &str,
        process_name: &str,
    ) -> Result<Vec<ProcessInfo>> {
        endpoints::list_processes(&self.http, &self.base_url, &self.auth, server, process_name)
            .await
    }

    /// Get the full command line of one process on a remote host.
    pub async fn get_command_line(&self, server: &str, pid: u32) -> Result<String> {
        endpoints::get_command_line(&self.http, &self.base_url, &self.auth, server, pid).await
    }

    /// List files under a path on a remote host.
    pub async fn list_files(
        &self,
        server: &str,
        path: &str,
        recursive: bool,
    ) -> Result<Vec<RemoteFile>> {
        endpoints::list_files(&self.http, &self.base_url, &self.auth, server, path, recursive)
            .await
    }

    /// Get free space and capacity of one volume on a remote host.
    pub async fn get_volume(&self, server: &str, drive: &str) -> Result<VolumeInfo> {
        endpoints::get_volume(&self.http, &self.base_url, &self.auth, server, drive).await
    }

    /// Invoke the farm-side log merge facility.
    pub async fn merge_log_window(
        &self,
        start_time: DateTime<Utc>,
        event_ids: &[&str],
    ) -> Result<Option<String>> {
        endpoints::merge_log_window(&self.http, &self.base_url, &self.auth, start_time, event_ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_auth() -> AuthStrategy {
        AuthStrategy::ApiToken {
            token: secrecy::SecretString::new("test-token".into()),
        }
    }

    #[test]
    fn builder_normalizes_trailing_slashes() {
        let client = SearchAdminClient::builder()
            .base_url("https://farm:9443//".to_string())
            .auth(token_auth())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://farm:9443");
    }

    #[test]
    fn builder_requires_base_url() {
        let err = SearchAdminClient::builder()
            .auth(token_auth())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn builder_requires_auth() {
        let err = SearchAdminClient::builder()
            .base_url("https://farm:9443".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed(_)));
    }
}
