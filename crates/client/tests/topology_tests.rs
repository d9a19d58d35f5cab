//! Status, topology, and health endpoint tests.
//!
//! Verifies wire parsing of the per-application admin endpoints and the
//! host probe endpoints used by the disk and process reports.

mod common;

use common::*;
use spindex_client::ComponentState;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};

const APP_ID: &str = "8f5f0e6a-3b5c-4d7e-9f0a-1b2c3d4e5f60";

fn app_id() -> Uuid {
    Uuid::parse_str(APP_ID).unwrap()
}

#[tokio::test]
async fn system_status_parses_check_time() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/search/applications/{APP_ID}/status")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/system_status.json")),
        )
        .mount(&mock_server)
        .await;

    let client = admin_client(&mock_server.uri());
    let status = client.get_system_status(app_id()).await.unwrap();

    assert_eq!(status.overall_state, "Running");
    assert_eq!(status.admin_component, "AdminComponent1");
    assert_eq!(status.index_home, r"E:\Index");
    assert_eq!(status.checked_at.to_rfc3339(), "2015-01-01T01:00:00+00:00");
}

#[tokio::test]
async fn topology_parses_states_and_details() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/search/applications/{APP_ID}/topology")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/topology.json")),
        )
        .mount(&mock_server)
        .await;

    let client = admin_client(&mock_server.uri());
    let components = client.get_topology(app_id()).await.unwrap();

    assert_eq!(components.len(), 3);
    assert_eq!(components[0].state, ComponentState::Active);
    assert_eq!(components[0].partition(), Some(0));
    assert_eq!(components[1].state, ComponentState::Unknown);
    assert!(!components[2].is_index_component());
    // Components without details still parse.
    assert!(components[2].details.is_empty());
}

#[tokio::test]
async fn component_health_parses_entries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/search/applications/{APP_ID}/components/IndexComponent1/health"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/health_index1.json")),
        )
        .mount(&mock_server)
        .await;

    let client = admin_client(&mock_server.uri());
    let entries = client
        .get_component_health(app_id(), "IndexComponent1")
        .await
        .unwrap();

    assert_eq!(entries.len(), 4);
    assert!(entries[0].name.starts_with("plugin: count of active documents"));
    assert_eq!(entries[0].message, "123456");
}

#[tokio::test]
async fn host_probes_parse_processes_files_and_volume() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hosts/idx-01/processes"))
        .and(query_param("name", "noderunner"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("hosts/processes.json")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hosts/idx-01/files"))
        .and(query_param("recursive", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("hosts/files_cell.json")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hosts/idx-01/volumes/E"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("hosts/volume.json")))
        .mount(&mock_server)
        .await;

    let client = admin_client(&mock_server.uri());

    let processes = client.list_processes("idx-01", "noderunner").await.unwrap();
    assert_eq!(processes.len(), 2);
    assert_eq!(processes[0].pid, 4242);

    let files = client
        .list_files("idx-01", r"\\idx-01\E$\Index\whatever", true)
        .await
        .unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files.iter().filter(|f| !f.is_dir).count(), 2);

    let volume = client.get_volume("idx-01", "E").await.unwrap();
    assert_eq!(volume.capacity, 214748364800);
}
