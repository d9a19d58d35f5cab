//! Builder-pattern configuration loader.
//!
//! Responsibilities:
//! - Accumulate configuration values from `.env`, environment
//!   variables, profile files, and caller overrides.
//! - Validate and produce the final `Config` in `build()`.
//!
//! Invariants:
//! - Later sources override earlier ones; callers apply CLI overrides
//!   after `from_env()`/`from_profile()`.
//! - An API token takes precedence over basic credentials when both
//!   are present.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::profile::apply_profile;
use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::types::{AuthStrategy, Config, ConnectionConfig, PathRules};

/// Hierarchical configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    profile_name: Option<String>,
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    api_token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    index_root: Option<String>,
    share_format: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `.env` file from the current directory if present.
    ///
    /// Setting `DOTENV_DISABLED=1` skips loading entirely; a missing
    /// file is not an error.
    pub fn load_dotenv(&self) -> Result<(), ConfigError> {
        if std::env::var("DOTENV_DISABLED").is_ok_and(|v| v == "1" || v == "true") {
            return Ok(());
        }
        match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::Dotenv(e.to_string())),
        }
    }

    /// Apply `SPINDEX_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Apply the named profile from the JSON profile file.
    pub fn from_profile(mut self) -> Result<Self, ConfigError> {
        apply_profile(&mut self)?;
        Ok(self)
    }

    // Caller-facing overrides (builder style).

    pub fn with_profile_name(mut self, name: String) -> Self {
        self.profile_name = Some(name);
        self
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_index_root(mut self, root: String) -> Self {
        self.index_root = Some(root);
        self
    }

    // Internal setters used by the env/profile appliers.

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_api_token(&mut self, token: Option<SecretString>) {
        self.api_token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_index_root(&mut self, root: Option<String>) {
        self.index_root = root;
    }

    pub(crate) fn set_share_format(&mut self, format: Option<String>) {
        self.share_format = format;
    }

    pub fn profile_name(&self) -> Option<&String> {
        self.profile_name.as_ref()
    }

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    /// Validate the accumulated values and build the final `Config`.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;

        let auth = if let Some(token) = self.api_token {
            AuthStrategy::ApiToken { token }
        } else if let (Some(username), Some(password)) = (self.username, self.password) {
            AuthStrategy::Basic { username, password }
        } else {
            return Err(ConfigError::MissingCredentials);
        };

        let mut paths = PathRules::default();
        if let Some(format) = self.share_format {
            paths.share_format = format;
        }
        paths.index_root = self.index_root;

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                skip_verify: self.skip_verify.unwrap_or(false),
                timeout: self
                    .timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            },
            auth,
            paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_base_url() {
        let err = ConfigLoader::new()
            .with_api_token("t".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn build_rejects_malformed_url() {
        let err = ConfigLoader::new()
            .with_base_url("not a url".to_string())
            .with_api_token("t".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn build_requires_credentials() {
        let err = ConfigLoader::new()
            .with_base_url("https://farm:9443".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }

    #[test]
    fn token_takes_precedence_over_basic_credentials() {
        let config = ConfigLoader::new()
            .with_base_url("https://farm:9443".to_string())
            .with_username("admin".to_string())
            .with_password("pw".to_string())
            .with_api_token("tok".to_string())
            .build()
            .unwrap();
        assert!(matches!(config.auth, AuthStrategy::ApiToken { .. }));
    }

    #[test]
    fn defaults_applied_when_unset() {
        let config = ConfigLoader::new()
            .with_base_url("https://farm:9443".to_string())
            .with_api_token("tok".to_string())
            .build()
            .unwrap();
        assert!(!config.connection.skip_verify);
        assert_eq!(
            config.connection.timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            config.paths.share_format,
            crate::constants::DEFAULT_SHARE_FORMAT
        );
    }
}
