//! Search service application models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One search service application in the farm.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchApplication {
    pub id: Uuid,
    pub name: String,
    /// Environment grouping identifier. Namespaces on-disk log export
    /// paths so two farms sharing one admin workstation don't collide.
    pub constellation: String,
}

/// Response wrapper for the application list endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApplicationListResponse {
    pub applications: Vec<SearchApplication>,
}
