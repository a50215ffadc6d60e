//! reqwest-backed HTTP transport
//!
//! Resolves request paths against a base URL, applies the configured
//! per-request timeout, and maps the outcome into the [`ApiResult`]
//! discriminated result: 2xx responses become [`HttpResponse`], completed
//! non-2xx exchanges become [`ApiFailure::Status`], and everything that
//! never completed becomes [`ApiFailure::Network`].

use std::time::Duration;

use crate::api::transport::{ApiFailure, ApiResult, HttpResponse, Method, OutgoingRequest, Transport};

/// HTTP transport over a shared [`reqwest::Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use url::Url;
/// use courier::api::transport::http::HttpTransport;
///
/// let transport = HttpTransport::new(
///     Url::parse("http://localhost:3000").unwrap(),
///     Duration::from_secs(10),
/// );
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    /// Underlying reqwest HTTP client.
    http: reqwest::Client,
    /// Base URL every request path is joined onto.
    base_url: url::Url,
}

impl HttpTransport {
    /// Constructs a transport targeting `base_url` with `timeout` applied
    /// to each individual request.
    ///
    /// No network I/O is performed at construction time.
    pub fn new(base_url: url::Url, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            // SAFETY: Default reqwest client construction cannot fail
            // unless TLS initialisation fails, which is a fatal startup
            // condition on any supported platform.
            .expect("failed to build reqwest client");

        Self { http, base_url }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &OutgoingRequest, bearer: Option<&str>) -> ApiResult {
        let url = self
            .base_url
            .join(request.path())
            .map_err(|e| ApiFailure::Network(format!("invalid request path: {e}")))?;

        let mut req = match request.method() {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };

        if !request.query().is_empty() {
            req = req.query(request.query());
        }
        if let Some(body) = request.body() {
            req = req.json(body);
        }
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiFailure::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiFailure::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ApiFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
