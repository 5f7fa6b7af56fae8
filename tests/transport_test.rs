//! Wiremock integration tests for the HTTP transport and the full
//! gateway → fetcher → transport path.

use std::time::Duration;

use muninn::{HttpTransport, Muninn, MuninnError, TransportError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn coin_summary_json() -> serde_json::Value {
    serde_json::json!({
        "id": "bitcoin",
        "market_data": { "current_price": { "usd": 100 } }
    })
}

#[tokio::test]
async fn get_json_decodes_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coin_summary_json()))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let body = transport
        .get_json(&format!("{}/coins/bitcoin", server.uri()), &[])
        .await
        .expect("fetch should succeed");

    assert_eq!(body["id"], "bitcoin");
    assert_eq!(body["market_data"]["current_price"]["usd"], 100);
}

#[tokio::test]
async fn query_parameters_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"prices": []})))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let body = transport
        .get_json(
            &format!("{}/coins/bitcoin/market_chart", server.uri()),
            &[("vs_currency", "usd"), ("days", "7")],
        )
        .await
        .expect("fetch should succeed");

    assert!(body["prices"].is_array());
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/unknown"))
        .respond_with(ResponseTemplate::new(404).set_body_string("coin not found"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let result = transport
        .get_json(&format!("{}/coins/unknown", server.uri()), &[])
        .await;

    match result {
        Err(TransportError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "coin not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let result = transport
        .get_json(&format!("{}/coins/bitcoin", server.uri()), &[])
        .await;

    assert!(matches!(result, Err(TransportError::Decode(_))));
}

#[tokio::test]
async fn unreachable_host_maps_to_connection_error() {
    let transport = HttpTransport::new();
    let result = transport.get_json("http://127.0.0.1:1/coins", &[]).await;

    assert!(matches!(result, Err(TransportError::Connection(_))));
}

#[tokio::test]
async fn gateway_retries_through_transport_then_caches() {
    let server = MockServer::start().await;
    // Two failures, then success.
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"price": 100})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = Muninn::builder()
        .base_delay(Duration::from_millis(1))
        .max_retries(2)
        .build()
        .unwrap();
    let transport = HttpTransport::new();
    let url = format!("{}/coins/bitcoin", server.uri());

    let fetch = || {
        let transport = transport.clone();
        let url = url.clone();
        async move { transport.get_json(&url, &[]).await }
    };

    let value: serde_json::Value = gateway
        .get_or_fetch("coin:summary:bitcoin", None, fetch)
        .await
        .expect("third attempt should succeed");
    assert_eq!(value["price"], 100);

    // Second logical request is a cache hit; the `.expect(1)` on the 200
    // mock verifies the upstream saw exactly one successful fetch.
    let again: serde_json::Value = gateway
        .get_or_fetch("coin:summary:bitcoin", None, fetch)
        .await
        .unwrap();
    assert_eq!(again["price"], 100);
}

#[tokio::test]
async fn gateway_exhaustion_surfaces_final_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let gateway = Muninn::builder()
        .base_delay(Duration::from_millis(1))
        .max_retries(1)
        .build()
        .unwrap();
    let transport = HttpTransport::new();
    let url = format!("{}/coins/bitcoin", server.uri());

    let result: muninn::Result<serde_json::Value> = gateway
        .get_or_fetch("coin:summary:bitcoin", None, || {
            let transport = transport.clone();
            let url = url.clone();
            async move { transport.get_json(&url, &[]).await }
        })
        .await;

    match result {
        Err(MuninnError::FetchExhausted { attempts, source }) => {
            assert_eq!(attempts, 2);
            assert!(matches!(source, TransportError::Status { status: 503, .. }));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}
