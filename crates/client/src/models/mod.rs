//! Wire models for the search admin API.

mod applications;
mod health;
mod hosts;
mod topology;

pub use applications::{ApplicationListResponse, SearchApplication};
pub use health::{HealthReportEntry, HealthReportResponse};
pub use hosts::{
    CommandLineResponse, FileListResponse, ProcessInfo, ProcessListResponse, RemoteFile,
    VolumeInfo,
};
pub use topology::{ComponentState, SystemStatus, TopologyComponent, TopologyResponse};
