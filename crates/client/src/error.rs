//! Error types for the search admin client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during admin client operations.
///
/// Every remote call is attempted exactly once; there is no retry
/// classification here.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from the admin endpoint.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Invalid response format from the admin endpoint.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// More than one search application exists and none was named.
    #[error("{count} search applications found; name one explicitly")]
    AmbiguousTarget { count: usize },

    /// Local file I/O on the log export cache failed.
    #[error("Log cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_))
            || matches!(self, Self::ApiError { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_error() {
        let err = ClientError::AuthFailed("bad credentials".to_string());
        assert!(err.is_auth_error());

        let err = ClientError::ApiError {
            status: 401,
            url: "https://farm:9443/api".to_string(),
            message: "unauthorized".to_string(),
        };
        assert!(err.is_auth_error());

        let err = ClientError::NotFound("Search Service Application".to_string());
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_ambiguous_target_display() {
        let err = ClientError::AmbiguousTarget { count: 3 };
        assert_eq!(
            err.to_string(),
            "3 search applications found; name one explicitly"
        );
    }
}
