//! Integration tests for the fetch engine
//!
//! These tests use wiremock to stand in for the remote map API and
//! exercise the full partition/fetch/merge cycle end-to-end.

use serde_json::json;
use starmap::config::FetchConfig;
use starmap::fetch::Coordinator;
use starmap::model::ResourceId;
use starmap::output::write_snapshot;
use starmap::MapError;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetch tuning with near-zero pauses so tests run quickly
fn test_fetch_config(workers: u32) -> FetchConfig {
    FetchConfig {
        max_retries: 3,
        retry_timeout_secs: 0.0,
        reopen_timeout_secs: 0.0,
        request_rate: 10_000.0,
        workers,
    }
}

fn coordinator(server: &MockServer, workers: u32) -> Coordinator {
    let base_url = Url::parse(&server.uri()).expect("Failed to parse mock server URL");
    Coordinator::new(base_url, "latest", test_fetch_config(workers))
}

/// Mounts a 200 JSON response for an API path
async fn mock_json(server: &MockServer, api_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_fetch_two_workers() {
    let mock_server = MockServer::start().await;

    // Four systems; system 1 references one stargate, the rest none.
    mock_json(&mock_server, "/latest/universe/systems/", json!([1, 2, 3, 4])).await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/1/",
        json!({"name": "Alpha", "stargates": [101]}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/2/",
        json!({"name": "Beta"}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/3/",
        json!({"name": "Gamma"}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/4/",
        json!({"name": "Delta"}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/stargates/101/",
        json!({"name": "Alpha gate", "destination": {"system_id": 2}}),
    )
    .await;

    let snapshot = coordinator(&mock_server, 2).run().await.expect("Fetch failed");

    assert_eq!(
        snapshot.systems.keys().copied().collect::<Vec<_>>(),
        vec![ResourceId(1), ResourceId(2), ResourceId(3), ResourceId(4)]
    );
    assert_eq!(
        snapshot.stargates.keys().copied().collect::<Vec<_>>(),
        vec![ResourceId(101)]
    );
    assert_eq!(snapshot.systems[&ResourceId(3)].label(), Some("Gamma"));
    assert_eq!(
        snapshot.stargates[&ResourceId(101)].label(),
        Some("Alpha gate")
    );
}

#[tokio::test]
async fn test_snapshot_file_round_trip() {
    let mock_server = MockServer::start().await;

    mock_json(&mock_server, "/latest/universe/systems/", json!([7])).await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/7/",
        json!({"name": "Solitude", "security_status": -0.1}),
    )
    .await;

    let snapshot = coordinator(&mock_server, 4).run().await.expect("Fetch failed");

    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    write_snapshot(&snapshot, file.path()).expect("Failed to write snapshot");

    let content = std::fs::read_to_string(file.path()).expect("Failed to read snapshot");
    let value: serde_json::Value = serde_json::from_str(&content).expect("Snapshot is not JSON");

    assert_eq!(value["systems"]["7"]["name"], "Solitude");
    assert_eq!(value["systems"]["7"]["security_status"], -0.1);
    assert_eq!(value["stargates"], json!({}));
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
    let mock_server = MockServer::start().await;

    mock_json(&mock_server, "/latest/universe/systems/", json!([1])).await;

    // First attempt gets a 502, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/latest/universe/systems/1/"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest/universe/systems/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Alpha"})))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let snapshot = coordinator(&mock_server, 1).run().await.expect("Fetch failed");

    assert_eq!(snapshot.systems[&ResourceId(1)].label(), Some("Alpha"));
}

#[tokio::test]
async fn test_exhausted_retries_fail_the_run() {
    let mock_server = MockServer::start().await;

    mock_json(&mock_server, "/latest/universe/systems/", json!([1, 2])).await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/1/",
        json!({"name": "Alpha"}),
    )
    .await;

    // System 2 never recovers; the whole run must fail, not produce a
    // partial snapshot.
    Mock::given(method("GET"))
        .and(path("/latest/universe/systems/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = coordinator(&mock_server, 2).run().await.unwrap_err();

    match err {
        MapError::Fetch(starmap::FetchError::Exhausted { path }) => {
            assert_eq!(path, "/latest/universe/systems/2/");
        }
        other => panic!("expected Exhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_listing_fails_the_run() {
    let mock_server = MockServer::start().await;

    // The listing parses as JSON but is not an array of IDs.
    mock_json(
        &mock_server,
        "/latest/universe/systems/",
        json!({"unexpected": true}),
    )
    .await;

    let err = coordinator(&mock_server, 2).run().await.unwrap_err();
    assert!(matches!(
        err,
        MapError::Fetch(starmap::FetchError::UnexpectedShape { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_references_across_workers() {
    let mock_server = MockServer::start().await;

    // Both systems reference the same stargate; with two workers it is
    // fetched twice and the stores collapse it to one entry.
    mock_json(&mock_server, "/latest/universe/systems/", json!([1, 2])).await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/1/",
        json!({"name": "Alpha", "stargates": [300]}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/2/",
        json!({"name": "Beta", "stargates": [300]}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/stargates/300/",
        json!({"name": "Shared gate"}),
    )
    .await;

    let snapshot = coordinator(&mock_server, 2).run().await.expect("Fetch failed");

    assert_eq!(snapshot.systems.len(), 2);
    assert_eq!(
        snapshot.stargates.keys().copied().collect::<Vec<_>>(),
        vec![ResourceId(300)]
    );
}

#[tokio::test]
async fn test_more_workers_than_systems() {
    let mock_server = MockServer::start().await;

    mock_json(&mock_server, "/latest/universe/systems/", json!([5, 6])).await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/5/",
        json!({"name": "Epsilon"}),
    )
    .await;
    mock_json(
        &mock_server,
        "/latest/universe/systems/6/",
        json!({"name": "Zeta"}),
    )
    .await;

    // Twenty workers for two systems degenerates to two slices.
    let snapshot = coordinator(&mock_server, 20).run().await.expect("Fetch failed");

    assert_eq!(snapshot.systems.len(), 2);
}
