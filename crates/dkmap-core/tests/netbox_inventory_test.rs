#![allow(clippy::unwrap_used)]
// `Inventory` backed by a mocked NetBox: conversion, links, error mapping.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dkmap_api::{NetboxClient, TransportConfig};
use dkmap_core::{CoreError, Inventory, Location};

async fn setup() -> (MockServer, NetboxClient) {
    let server = MockServer::start().await;
    let token = SecretString::from("t0ken".to_string());
    let client =
        NetboxClient::from_token(&server.uri(), &token, &TransportConfig::default()).unwrap();
    (server, client)
}

fn page(results: serde_json::Value) -> serde_json::Value {
    let count = results.as_array().map_or(0, Vec::len);
    json!({ "count": count, "next": null, "previous": null, "results": results })
}

#[tokio::test]
async fn test_locations_carry_ui_links() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/locations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 12, "name": "DK-A", "slug": "dk-a", "display": "DK-A" },
            { "id": 13, "name": "NOC", "slug": "noc", "display": "NOC" }
        ]))))
        .mount(&server)
        .await;

    let locations = client.locations().await.unwrap();

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].name, "DK-A");
    assert!(locations[0].is_dk());
    assert_eq!(
        locations[0].url.as_ref().unwrap().as_str(),
        format!("{}/dcim/locations/12/", server.uri())
    );
}

#[tokio::test]
async fn test_devices_and_racks_at_location() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("location_id", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {
                "id": 3,
                "name": "dk-a-sw1",
                "display": "dk-a-sw1",
                "device_type": { "id": 7, "display": "Juniper EX2200-C", "model": "EX2200-C" },
                "status": { "value": "active", "label": "Active" }
            },
            {
                "id": 4,
                "name": null,
                "display": "Unnamed device",
                "device_type": { "id": 8, "display": "PDU", "model": "PDU" },
                "status": { "value": "planned", "label": "Planned" }
            }
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/racks/"))
        .and(query_param("location_id", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 40, "name": "Rack A", "display": "Rack A" }
        ]))))
        .mount(&server)
        .await;

    let location = Location::new(12, "DK-A");
    let devices = client.devices_at(&location).await.unwrap();
    let racks = client.racks_at(&location).await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name.as_deref(), Some("dk-a-sw1"));
    assert_eq!(devices[0].device_type, "Juniper EX2200-C");
    assert!(devices[0].is_active());
    assert_eq!(devices[0].alive, None);
    assert_eq!(
        devices[0].url.as_ref().unwrap().as_str(),
        format!("{}/dcim/devices/3/", server.uri())
    );
    assert_eq!(devices[1].name, None);
    assert!(!devices[1].is_active());

    assert_eq!(racks.len(), 1);
    assert_eq!(racks[0].name, "Rack A");
    assert_eq!(
        racks[0].url.as_ref().unwrap().as_str(),
        format!("{}/dcim/racks/40/", server.uri())
    );
}

#[tokio::test]
async fn test_rejected_token_is_authentication_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/locations/"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "detail": "Invalid token" })),
        )
        .mount(&server)
        .await;

    let err = client.locations().await.unwrap_err();
    assert!(
        matches!(err, CoreError::AuthenticationFailed { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn test_server_error_is_inventory_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "oops" })))
        .mount(&server)
        .await;

    let err = client
        .devices_at(&Location::new(1, "DK-1"))
        .await
        .unwrap_err();
    match err {
        CoreError::Inventory { status, message } => {
            assert_eq!(status, Some(500));
            assert!(message.contains("oops"));
        }
        other => panic!("expected Inventory error, got: {other:?}"),
    }
}
