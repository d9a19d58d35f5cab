//! Remote host probe models: processes, files, volumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One process on a remote host.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

/// Response wrapper for the process list endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProcessListResponse {
    pub processes: Vec<ProcessInfo>,
}

/// Response wrapper for the process command-line endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandLineResponse {
    #[serde(rename = "commandLine")]
    pub command_line: String,
}

/// One file or directory entry on a remote host.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemoteFile {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    #[serde(rename = "isDir")]
    pub is_dir: bool,
}

/// Response wrapper for the remote file list endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileListResponse {
    pub files: Vec<RemoteFile>,
}

/// Free space and capacity of one remote volume.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VolumeInfo {
    pub drive: String,
    pub free: u64,
    pub capacity: u64,
}
