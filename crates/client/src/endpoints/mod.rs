//! Raw admin endpoint functions.
//!
//! One free function per endpoint, each taking the shared HTTP client,
//! the base URL, and the auth strategy. Every call is attempted exactly
//! once: a failed or slow farm surfaces immediately as a recoverable
//! condition in the report pipeline rather than being retried.

mod applications;
mod health;
mod hosts;
mod logs;
mod topology;

pub use applications::list_applications;
pub use health::get_component_health;
pub use hosts::{get_command_line, get_volume, list_files, list_processes};
pub use logs::merge_log_window;
pub use topology::{get_system_status, get_topology};

use reqwest::{RequestBuilder, Response};

use crate::error::{ClientError, Result};

/// Send a request and map non-success statuses to `ApiError`.
pub(crate) async fn send_request(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "could not read error response body".to_string());

    Err(ClientError::ApiError {
        status,
        url,
        message,
    })
}
