//! HTTP-level tests of the change feed contract.

use netgrid_engine::{ChangeSet, Device, Watermark};
use netgrid_server::store::DeviceStore;
use netgrid_server::AppState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the server on an ephemeral port; returns the base URL and a
/// handle on the store for direct seeding.
async fn spawn_server() -> (String, Arc<DeviceStore>) {
    let store = Arc::new(DeviceStore::new());
    let state = AppState {
        store: Arc::clone(&store),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, netgrid_server::app(state)).await.unwrap();
    });
    (format!("http://{addr}"), store)
}

fn upsert_body(id: i64, hostname: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "hostname": hostname,
        "ip_address": format!("10.0.0.{id}"),
        "device_type": "switch",
        "status": status,
    })
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (base, _store) = spawn_server().await;

    let body: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_collection_is_ordered_by_id() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    for id in [5, 1, 3] {
        client
            .post(format!("{base}/collection"))
            .json(&upsert_body(id, &format!("sw-{id:02}"), "online"))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();
    }

    let devices: Vec<Device> = client
        .get(format!("{base}/collection"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids: Vec<_> = devices.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 3, 5]);
}

#[tokio::test]
async fn changes_since_returns_only_modified_devices() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/collection"))
        .json(&upsert_body(1, "sw-01", "online"))
        .send()
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let cursor = Watermark::now();
    tokio::time::sleep(Duration::from_millis(10)).await;

    client
        .post(format!("{base}/collection"))
        .json(&upsert_body(2, "sw-02", "online"))
        .send()
        .await
        .unwrap();

    let set: ChangeSet = client
        .get(format!("{base}/collection/changes/since/{cursor}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(set.changed.len(), 1);
    assert_eq!(set.changed[0].id, 2);
    assert!(set.watermark > cursor);
}

#[tokio::test]
async fn changes_response_is_cacheable() {
    let (base, _store) = spawn_server().await;

    let response = reqwest::get(format!(
        "{base}/collection/changes/since/2025-12-10T15:05:00Z"
    ))
    .await
    .unwrap();

    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=120"
    );
}

#[tokio::test]
async fn malformed_cursor_falls_back_to_full_collection() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    for id in [1, 2] {
        client
            .post(format!("{base}/collection"))
            .json(&upsert_body(id, &format!("sw-{id:02}"), "online"))
            .send()
            .await
            .unwrap();
    }

    let response = client
        .get(format!("{base}/collection/changes/since/not-a-timestamp"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let set: ChangeSet = response.json().await.unwrap();
    assert_eq!(set.changed.len(), 2);
    // The replacement cursor is valid and usable for the next poll.
    assert!(Watermark::parse(&set.watermark.to_string()).is_ok());
}

#[tokio::test]
async fn legacy_status_values_are_normalized_on_the_wire() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/collection"))
        .json(&upsert_body(1, "sw-01", "up"))
        .send()
        .await
        .unwrap();

    let devices: serde_json::Value = client
        .get(format!("{base}/collection"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(devices[0]["status"], "online");
}

#[tokio::test]
async fn registration_allocates_id_and_stamps_last_seen() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let device: Device = client
        .post(format!("{base}/collection"))
        .json(&json!({
            "hostname": "sw-01",
            "ip_address": "10.0.0.1",
            "device_type": "switch",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(device.id, 1);
    assert!(device.last_seen.is_some());
}

#[tokio::test]
async fn duplicate_ip_is_rejected() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/collection"))
        .json(&upsert_body(1, "sw-01", "online"))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{base}/collection"))
        .json(&json!({
            "hostname": "sw-02",
            "ip_address": "10.0.0.1",
            "device_type": "switch",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("IP"));
}

#[tokio::test]
async fn missing_ip_is_rejected() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/collection"))
        .json(&json!({
            "hostname": "sw-01",
            "ip_address": "  ",
            "device_type": "switch",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}
