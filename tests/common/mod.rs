//! Shared helpers for the integration test suite

use std::sync::Arc;
use std::time::Duration;

use courier::api::client::ApiClient;
use courier::api::transport::http::HttpTransport;
use courier::config::RoutesConfig;
use courier::storage::MemoryTokenStore;

/// Builds an `ApiClient` over a real `HttpTransport` pointed at a wiremock
/// server, sharing state with the given in-memory store.
#[allow(dead_code)]
pub fn make_client(base_url: &str, store: &MemoryTokenStore) -> ApiClient {
    let transport = Arc::new(HttpTransport::new(
        url::Url::parse(base_url).expect("valid url"),
        Duration::from_secs(5),
    ));
    ApiClient::new(transport, Arc::new(store.clone()), RoutesConfig::default())
}

/// A refresh-endpoint response body rotating to the given pair.
#[allow(dead_code)]
pub fn refresh_response(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "accessToken": access,
        "refreshToken": refresh,
        "expiresIn": 900,
    })
}
