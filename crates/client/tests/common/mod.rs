//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for testing the spindex client against
//! a wiremock farm. All integration tests use these to stay consistent.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON

#[allow(unused_imports)]
pub use spindex_client::testing::load_fixture;

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use spindex_client::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use spindex_client::SearchAdminClient;
use spindex_config::AuthStrategy;

/// Token auth used by every test; the mock farm ignores it.
pub fn token_auth() -> AuthStrategy {
    AuthStrategy::ApiToken {
        token: secrecy::SecretString::new("test-token".into()),
    }
}

/// A client pointed at the given mock farm.
#[allow(dead_code)]
pub fn admin_client(base_url: &str) -> SearchAdminClient {
    SearchAdminClient::builder()
        .base_url(base_url.to_string())
        .auth(token_auth())
        .build()
        .expect("client builds against mock farm")
}
