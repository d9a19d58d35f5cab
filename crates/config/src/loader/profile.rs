//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Load configuration from the JSON profile file (a map of profile
//!   name to `ProfileConfig`).
//! - Apply profile settings to a `ConfigLoader` instance.
//!
//! Invariants:
//! - Profile settings are applied before environment variables when the
//!   caller follows the loader chain (env vars take precedence).
//! - A missing profile file or profile name is an error only when a
//!   profile was explicitly requested.

use secrecy::SecretString;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::ProfileConfig;

/// Default location of the profile file.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", "spindex")
        .ok_or_else(|| ConfigError::ConfigDirUnavailable("no home directory".to_string()))?;
    Ok(dirs.config_dir().join("profiles.json"))
}

/// Apply the loader's named profile from the profile file.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = match loader.config_path() {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    if !config_path.exists() {
        return Err(ConfigError::ProfileNotFound(profile_name));
    }

    let raw = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ProfileRead {
        path: config_path.display().to_string(),
        message: e.to_string(),
    })?;
    let profiles: BTreeMap<String, ProfileConfig> =
        serde_json::from_str(&raw).map_err(|e| ConfigError::ProfileRead {
            path: config_path.display().to_string(),
            message: e.to_string(),
        })?;

    let profile = profiles
        .get(&profile_name)
        .ok_or(ConfigError::ProfileNotFound(profile_name))?;

    apply_profile_config(loader, profile);
    Ok(())
}

fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    if let Some(url) = &profile.base_url {
        loader.set_base_url(Some(url.clone()));
    }
    if let Some(username) = &profile.username {
        loader.set_username(Some(username.clone()));
    }
    if let Some(password) = &profile.password {
        loader.set_password(Some(SecretString::new(password.clone().into())));
    }
    if let Some(token) = &profile.api_token {
        loader.set_api_token(Some(SecretString::new(token.clone().into())));
    }
    if let Some(skip) = profile.skip_verify {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(std::time::Duration::from_secs(secs)));
    }
    if let Some(root) = &profile.index_root {
        loader.set_index_root(Some(root.clone()));
    }
    if let Some(format) = &profile.share_format {
        loader.set_share_format(Some(format.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthStrategy;
    use std::io::Write;

    fn write_profiles(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn profile_values_are_applied() {
        let file = write_profiles(
            r#"{"lab": {"base_url": "https://lab:9443", "api_token": "tok", "skip_verify": true}}"#,
        );
        let config = ConfigLoader::new()
            .with_profile_name("lab".to_string())
            .with_config_path(file.path().to_path_buf())
            .from_profile()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://lab:9443");
        assert!(config.connection.skip_verify);
        assert!(matches!(config.auth, AuthStrategy::ApiToken { .. }));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let file = write_profiles(r#"{"lab": {}}"#);
        let err = ConfigLoader::new()
            .with_profile_name("prod".to_string())
            .with_config_path(file.path().to_path_buf())
            .from_profile()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound(name) if name == "prod"));
    }

    #[test]
    fn no_profile_name_is_a_no_op() {
        let loader = ConfigLoader::new().from_profile().unwrap();
        assert!(loader.profile_name().is_none());
    }
}
