//! Remote host probe endpoints: processes, files, volumes.

use reqwest::Client;
use spindex_config::AuthStrategy;

use crate::auth::apply_auth;
use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::models::{
    CommandLineResponse, FileListResponse, ProcessInfo, ProcessListResponse, RemoteFile,
    VolumeInfo,
};

/// List processes with the given image name on a remote host.
pub async fn list_processes(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    server: &str,
    process_name: &str,
) -> Result<Vec<ProcessInfo>> {
    let url = format!("{}/api/hosts/{}/processes", base_url, server);

    let builder = apply_auth(client.get(&url), auth).query(&[("name", process_name)]);
    let response = send_request(builder).await?;

    let resp: ProcessListResponse = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse process list: {}", e))
    })?;

    Ok(resp.processes)
}

/// Get the full command line of one process on a remote host.
pub async fn get_command_line(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    server: &str,
    pid: u32,
) -> Result<String> {
    let url = format!("{}/api/hosts/{}/processes/{}/commandline", base_url, server, pid);

    let builder = apply_auth(client.get(&url), auth);
    let response = send_request(builder).await?;

    let resp: CommandLineResponse = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse command line: {}", e))
    })?;

    Ok(resp.command_line)
}

/// List files under a path on a remote host.
///
/// With `recursive` set, every file below the path is returned flat;
/// otherwise only the immediate children (including directories).
pub async fn list_files(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    server: &str,
    path: &str,
    recursive: bool,
) -> Result<Vec<RemoteFile>> {
    let url = format!("{}/api/hosts/{}/files", base_url, server);

    let builder = apply_auth(client.get(&url), auth)
        .query(&[("path", path)])
        .query(&[("recursive", recursive)]);
    let response = send_request(builder).await?;

    let resp: FileListResponse = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse file list: {}", e)))?;

    Ok(resp.files)
}

/// Get free space and capacity of one volume on a remote host.
pub async fn get_volume(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    server: &str,
    drive: &str,
) -> Result<VolumeInfo> {
    let url = format!("{}/api/hosts/{}/volumes/{}", base_url, server, drive);

    let builder = apply_auth(client.get(&url), auth);
    let response = send_request(builder).await?;

    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse volume info: {}", e)))
}
