//! Integration tests for `ErpClient` and `fetch_with_retry`.
//!
//! Each test stands up a `wiremock` server in place of the ERP, so no real
//! network traffic is made. Back-off is zero so retry tests run instantly.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lapstore_erp::{fetch_with_retry, ErpClient, ErpError, RetryPolicy};

fn test_client(max_retries: u32) -> ErpClient {
    ErpClient::new(5, "lapstore-test/0.1", RetryPolicy::new(max_retries, 0))
        .expect("failed to build test ErpClient")
}

fn item_list_body() -> serde_json::Value {
    json!({
        "status": "success",
        "data": [
            { "id": 1, "item_name": "Dell XPS 13", "sale_price": "275000" },
            { "id": 2, "item_name": "HP Envy 14", "sale_price": "240000" }
        ]
    })
}

// ---------------------------------------------------------------------------
// fetch_with_retry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/itemList", server.uri());
    let response = fetch_with_retry(&client, &url, RetryPolicy::new(3, 0))
        .await
        .expect("transport should succeed");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn does_not_retry_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/itemList", server.uri());
    let response = fetch_with_retry(&client, &url, RetryPolicy::new(3, 0))
        .await
        .expect("transport should succeed");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn retries_rate_limited_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/itemList", server.uri());
    let response = fetch_with_retry(&client, &url, RetryPolicy::new(3, 0))
        .await
        .expect("transport should succeed");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn exhausted_retries_return_last_failing_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/itemList", server.uri());
    let response = fetch_with_retry(&client, &url, RetryPolicy::new(2, 0))
        .await
        .expect("an HTTP response, not a transport error");

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn requests_ask_for_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/itemList", server.uri());
    let response = fetch_with_retry(&client, &url, RetryPolicy::default())
        .await
        .expect("transport should succeed");

    assert_eq!(response.status(), 200);
}

// ---------------------------------------------------------------------------
// ErpClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_item_list_returns_raw_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_list_body()))
        .mount(&server)
        .await;

    let url = ErpClient::item_list_url(&server.uri()).unwrap();
    let items = test_client(0).fetch_item_list(&url).await;

    assert!(items.is_ok(), "expected Ok, got: {items:?}");
    let items = items.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].item_name, Some(json!("HP Envy 14")));
}

#[tokio::test]
async fn fetch_item_list_maps_exhausted_retries_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/itemList", server.uri());
    let err = test_client(1).fetch_item_list(&url).await.unwrap_err();

    assert!(
        matches!(err, ErpError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_item_list_rejects_envelope_without_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "error", "message": "x" })),
        )
        .mount(&server)
        .await;

    let url = format!("{}/itemList", server.uri());
    let err = test_client(0).fetch_item_list(&url).await.unwrap_err();

    assert!(
        matches!(err, ErpError::MalformedPayload { .. }),
        "expected MalformedPayload, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_payload_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/itemList"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let url = format!("{}/itemList", server.uri());
    let err = test_client(0).fetch_payload(&url).await.unwrap_err();

    assert!(
        matches!(err, ErpError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}
