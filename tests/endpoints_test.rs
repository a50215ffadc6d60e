//! Endpoint wrapper integration tests
//!
//! Verifies the typed wrappers against a wiremock server: paths, query
//! parameters, request bodies, and response decoding.

mod common;

use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use courier::api::deliveries::{self, DeliveryFilter};
use courier::api::ping::{self, PingOutcome};
use courier::api::auth;
use courier::storage::MemoryTokenStore;

/// `request_magic_link` posts the email and decodes the acknowledgement.
#[tokio::test]
async fn test_request_magic_link_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/auth/request-link"))
        .and(body_string_contains("sam@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::new();
    let client = common::make_client(&server.uri(), &store);

    let ack = auth::request_magic_link(&client, "sam@example.com")
        .await
        .expect("request succeeds");
    assert!(ack.ok);
    server.verify().await;
}

/// The deliveries list passes filters as query parameters and decodes the
/// summaries.
#[tokio::test]
async fn test_list_deliveries_with_filters() {
    let server = MockServer::start().await;

    let body = serde_json::json!([{
        "id": "del-1",
        "orderNumber": "ORD-1001",
        "clientName": "Cafe Luna",
        "addressLine1": "12 Vine St",
        "scheduledFor": "2026-08-06T14:30:00Z",
        "status": "pending",
        "itemCount": 3
    }]);

    Mock::given(method("GET"))
        .and(path("/api/mobile/driver/deliveries"))
        .and(query_param("date", "2026-08-06"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::with_tokens("acc", "ref");
    let client = common::make_client(&server.uri(), &store);

    let filter = DeliveryFilter {
        date: Some("2026-08-06".to_string()),
        status: Some("pending".to_string()),
    };
    let summaries = deliveries::list_deliveries(&client, &filter)
        .await
        .expect("list succeeds");

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].order_number, "ORD-1001");
    assert_eq!(summaries[0].item_count, 3);
    server.verify().await;
}

/// An empty filter adds no query parameters.
#[tokio::test]
async fn test_list_deliveries_without_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mobile/driver/deliveries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::with_tokens("acc", "ref");
    let client = common::make_client(&server.uri(), &store);

    let summaries = deliveries::list_deliveries(&client, &DeliveryFilter::default())
        .await
        .expect("list succeeds");
    assert!(summaries.is_empty());
    server.verify().await;
}

/// Delivery detail hits the id-suffixed path and decodes the full shape.
#[tokio::test]
async fn test_delivery_detail_roundtrip() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": "del-9",
        "orderNumber": "ORD-1009",
        "clientName": "Bakery 9",
        "addressLine1": "80 Mill Rd",
        "scheduledFor": "2026-08-06T09:00:00Z",
        "status": "in_transit",
        "itemCount": 2,
        "fullAddress": "80 Mill Rd, Springfield",
        "phone": "+1 555 0100",
        "notes": "Ring twice",
        "items": [
            {"name": "Flour", "qty": 4, "vendorName": "MillCo"},
            {"name": "Yeast", "qty": 2, "vendorName": "MillCo"}
        ],
        "totalCents": 12999,
        "vendorName": "MillCo",
        "pickedUpAt": "2026-08-06T08:15:00Z",
        "inTransitAt": "2026-08-06T08:20:00Z",
        "deliveredAt": null,
        "exceptionAt": null,
        "exceptionReason": null
    });

    Mock::given(method("GET"))
        .and(path("/api/mobile/driver/deliveries/del-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::with_tokens("acc", "ref");
    let client = common::make_client(&server.uri(), &store);

    let detail = deliveries::delivery_detail(&client, "del-9")
        .await
        .expect("detail succeeds");

    assert_eq!(detail.order_number, "ORD-1009");
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.total_cents, Some(12999));
    assert!(detail.delivered_at.is_none());
    server.verify().await;
}

/// Ping distinguishes a healthy server from a reachable-but-unhappy one.
#[tokio::test]
async fn test_ping_reports_reachability() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mobile/ping"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::new();
    let client = common::make_client(&server.uri(), &store);

    let outcome = ping::ping(&client).await;
    assert_eq!(outcome, PingOutcome::Ok(200));
    server.verify().await;
}

/// Ping against a dead port reports a network error, not a panic.
#[tokio::test]
async fn test_ping_unreachable_server() {
    let store = MemoryTokenStore::new();
    // Nothing listens here.
    let client = common::make_client("http://127.0.0.1:59998", &store);

    let outcome = ping::ping(&client).await;
    assert!(matches!(outcome, PingOutcome::Unreachable(_)));
}
