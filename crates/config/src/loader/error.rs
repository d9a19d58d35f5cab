//! Errors surfaced while loading configuration.

use thiserror::Error;

/// Errors that can occur while assembling a `Config`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No base URL was provided by any source.
    #[error("base URL is required (set SPINDEX_BASE_URL or --base-url)")]
    MissingBaseUrl,

    /// The base URL could not be parsed.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// No usable credentials were provided.
    #[error("credentials are required (set SPINDEX_API_TOKEN, or SPINDEX_USERNAME and SPINDEX_PASSWORD)")]
    MissingCredentials,

    /// An environment variable held an unparseable value.
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    /// The platform config directory could not be resolved.
    #[error("config directory unavailable: {0}")]
    ConfigDirUnavailable(String),

    /// The requested profile does not exist in the profile file.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// The profile file could not be read or parsed.
    #[error("failed to read profile file {path}: {message}")]
    ProfileRead { path: String, message: String },

    /// `.env` loading failed for a reason other than the file missing.
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
}
