//! Request authentication.
//!
//! The admin endpoint accepts either a bearer token or basic farm-admin
//! credentials; both come from `spindex_config::AuthStrategy`.

use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use spindex_config::AuthStrategy;

/// Apply the configured authentication to a request builder.
pub fn apply_auth(builder: RequestBuilder, auth: &AuthStrategy) -> RequestBuilder {
    match auth {
        AuthStrategy::ApiToken { token } => builder.bearer_auth(token.expose_secret()),
        AuthStrategy::Basic { username, password } => {
            builder.basic_auth(username, Some(password.expose_secret()))
        }
    }
}
