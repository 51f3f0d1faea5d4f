#![allow(clippy::unwrap_used)]
// Integration tests for `PrometheusClient` using wiremock.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dkmap_api::{Error, PrometheusClient};

async fn setup() -> (MockServer, PrometheusClient) {
    let server = MockServer::start().await;
    let client = PrometheusClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_up_by_job() {
    let (server, client) = setup().await;
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();

    let body = json!({
        "status": "success",
        "data": {
            "resultType": "vector",
            "result": [
                { "metric": { "__name__": "up", "job": "dk-a-sw1" }, "value": [1_699_999_990.5, "1"] },
                { "metric": { "__name__": "up", "job": "dk-b-sw1" }, "value": [1_699_999_990.5, "0"] },
                { "metric": { "__name__": "up", "job": "dk-c-sw1" }, "value": [1_699_990_000.0, "1"] }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .and(query_param("query", "up"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let up = client
        .up_by_job(now, Duration::from_secs(300))
        .await
        .unwrap();

    assert_eq!(up.len(), 3);
    assert!(up["dk-a-sw1"]);
    assert!(!up["dk-b-sw1"]);
    assert!(!up["dk-c-sw1"], "stale sample must not count as up");
}

#[tokio::test]
async fn test_query_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "errorType": "bad_data",
            "error": "invalid parameter \"query\""
        })))
        .mount(&server)
        .await;

    let err = client.query("up{").await.unwrap_err();
    match err {
        Error::Prometheus { error_type, .. } => assert_eq!(error_type, "bad_data"),
        other => panic!("expected Prometheus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.query("up").await.unwrap_err();
    assert!(
        matches!(err, Error::Prometheus { ref error_type, .. } if error_type == "http_502"),
        "unexpected error: {err:?}"
    );
}
