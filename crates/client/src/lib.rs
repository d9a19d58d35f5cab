//! Search administration client and index report pipeline.
//!
//! This crate provides a typed client for a SharePoint Search farm's
//! administrative REST surface (applications, topology, component
//! health, host probes, diagnostic log export) and the report pipeline
//! built on top of it: target resolution, status collection, windowed
//! log extraction, and report synthesis. Rendering lives in the CLI.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod report;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::apply_auth;
pub use client::{SearchAdminClient, SearchAdminClientBuilder};
pub use error::{ClientError, Result};
pub use models::{
    ComponentState, HealthReportEntry, ProcessInfo, RemoteFile, SearchApplication, SystemStatus,
    TopologyComponent, VolumeInfo,
};
pub use report::{
    CellReport, DiskReport, IndexReport, MergeEvent, ReportOptions, ReportSession, TargetSelector,
    run_reports,
};
