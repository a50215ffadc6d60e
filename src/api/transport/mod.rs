//! HTTP transport abstraction and implementations
//!
//! This module defines the [`Transport`] trait that carries requests to the
//! delivery API, plus the request/response/failure types shared by the
//! whole `api` layer. Concrete implementations live in submodules:
//!
//! - [`http::HttpTransport`] -- reqwest-backed transport with a base URL
//!   and per-request timeout.
//! - [`fake::FakeTransport`] -- in-process fake used in tests (cfg(test)
//!   only).
//!
//! # Failure shape
//!
//! A completed HTTP exchange with a non-2xx status is a failure
//! ([`ApiFailure::Status`]) carrying the status code and body; an exchange
//! that never completed is [`ApiFailure::Network`]. This discriminated
//! result is the native failure representation of the whole client:
//! the authenticated client in [`crate::api::client`] either resolves with
//! the response or rejects with exactly the failure the caller would have
//! seen without it.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::{CourierError, Result};

pub mod http;

#[cfg(test)]
pub mod fake;

/// HTTP methods used by the delivery API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request description, carried from the endpoint wrappers through the
/// authenticated client to the transport.
///
/// The `retried` marker records whether the request has already been
/// replayed once after a token refresh; it is private to each request value
/// and needs no synchronization.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl OutgoingRequest {
    /// Creates a GET request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    /// Creates a POST request for `path` with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
            retried: false,
        }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The request path, relative to the transport's base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// The JSON body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether this request has already been replayed after a refresh.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Marks this request as replayed. A request is replayed at most once;
    /// a second `401` after this is terminal.
    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }
}

/// A successful (2xx) HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| CourierError::Serialization(e).into())
    }
}

/// Failure outcome of a transport call.
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
    /// The exchange completed but the server answered with a non-2xx
    /// status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, useful for error payloads.
        body: String,
    },

    /// The exchange never completed: connection failure, timeout, or an
    /// unreadable response.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiFailure {
    /// The HTTP status of a completed-but-failed exchange, `None` for
    /// network-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiFailure::Status { status, .. } => Some(*status),
            ApiFailure::Network(_) => None,
        }
    }

    /// Whether this failure is a `401 Unauthorized`.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Outcome of a single transport call.
pub type ApiResult = std::result::Result<HttpResponse, ApiFailure>;

/// Abstraction over the HTTP substrate.
///
/// The transport knows nothing about authentication beyond attaching the
/// bearer token it is handed; token lifecycle is the authenticated
/// client's job.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Executes `request`, attaching `bearer` as an `Authorization: Bearer`
    /// credential when present.
    async fn execute(&self, request: &OutgoingRequest, bearer: Option<&str>) -> ApiResult;
}
