//! Configuration types for spindex.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Strategy for authenticating against the farm admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// Basic authentication with farm admin credentials.
    #[serde(rename = "basic")]
    Basic {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// Bearer token authentication.
    #[serde(rename = "token")]
    ApiToken {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the admin endpoint (e.g., https://farm-admin:9443)
    pub base_url: String,
    /// Whether to skip TLS verification (for lab farms with
    /// self-signed certificates)
    pub skip_verify: bool,
    /// Connection timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

/// Rules for deriving remote disk paths.
///
/// The original path conventions (drive-letter-to-share mapping, index
/// root location) are environment specific, so both are configurable
/// rather than hard-coded in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRules {
    /// Template for turning a component-local path into an
    /// administrative share path. `{server}` and `{drive}` are
    /// substituted.
    pub share_format: String,
    /// Explicit index root directory. When unset, the component's own
    /// reported root directory is used.
    pub index_root: Option<String>,
}

impl Default for PathRules {
    fn default() -> Self {
        Self {
            share_format: crate::constants::DEFAULT_SHARE_FORMAT.to_string(),
            index_root: None,
        }
    }
}

impl PathRules {
    /// Map a local path like `C:\SearchIndex\...` on `server` to its
    /// remote share form, e.g. `\\server\C$\SearchIndex\...`.
    ///
    /// Paths without a drive-letter prefix are returned unchanged (they
    /// are assumed to already be share paths).
    pub fn to_share_path(&self, server: &str, local_path: &str) -> String {
        let bytes = local_path.as_bytes();
        let has_drive =
            bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
        if !has_drive {
            return local_path.to_string();
        }
        let drive = &local_path[..1];
        let rest = local_path[2..].trim_start_matches('\\');
        let root = self
            .share_format
            .replace("{server}", server)
            .replace("{drive}", drive);
        format!("{}\\{}", root, rest)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthStrategy,
    /// Remote path derivation rules
    #[serde(default)]
    pub paths: PathRules,
}

/// One named profile inside the JSON profile file.
///
/// Every field is optional; unset fields fall back to environment
/// variables or defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_token: Option<String>,
    pub skip_verify: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub index_root: Option<String>,
    pub share_format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_path_substitutes_server_and_drive() {
        let rules = PathRules::default();
        assert_eq!(
            rules.to_share_path("idx-01", r"E:\SearchIndex\data"),
            r"\\idx-01\E$\SearchIndex\data"
        );
    }

    #[test]
    fn share_path_passes_through_unc_paths() {
        let rules = PathRules::default();
        assert_eq!(
            rules.to_share_path("idx-01", r"\\filer\index\data"),
            r"\\filer\index\data"
        );
    }

    #[test]
    fn share_path_honors_custom_format() {
        let rules = PathRules {
            share_format: r"\\{server}.corp.local\{drive}$".to_string(),
            index_root: None,
        };
        assert_eq!(
            rules.to_share_path("idx-01", r"C:\idx"),
            r"\\idx-01.corp.local\C$\idx"
        );
    }
}
