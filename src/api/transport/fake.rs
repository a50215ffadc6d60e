//! In-process fake transport for unit tests
//!
//! [`FakeTransport`] replaces real network I/O in tests. Script it with a
//! queue of [`ApiResult`] values (popped in order, one per `execute` call)
//! and inspect the calls the code under test made via [`FakeTransport::calls`].
//!
//! ```
//! use courier::api::transport::fake::FakeTransport;
//! use courier::api::transport::{ApiFailure, OutgoingRequest, Transport};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = FakeTransport::new();
//! transport.push_failure(ApiFailure::Status { status: 401, body: String::new() });
//!
//! let request = OutgoingRequest::get("/api/mobile/ping");
//! let result = transport.execute(&request, Some("tok")).await;
//! assert!(result.is_err());
//!
//! let calls = transport.calls();
//! assert_eq!(calls[0].bearer.as_deref(), Some("tok"));
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::transport::{ApiFailure, ApiResult, HttpResponse, OutgoingRequest, Transport};

/// A recorded `execute` call: the request snapshot plus the bearer token
/// that was attached.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Snapshot of the request as the transport saw it.
    pub request: OutgoingRequest,
    /// Bearer token attached to the call, if any.
    pub bearer: Option<String>,
}

/// Scripted in-process transport.
#[derive(Debug, Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<ApiResult>>,
    log: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    /// Creates a fake with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful 200 response with the given body.
    pub fn push_ok(&self, body: &str) {
        self.script.lock().unwrap().push_back(Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        }));
    }

    /// Queues a failure outcome.
    pub fn push_failure(&self, failure: ApiFailure) {
        self.script.lock().unwrap().push_back(Err(failure));
    }

    /// Queues a `401 Unauthorized` with an empty error body.
    pub fn push_unauthorized(&self) {
        self.push_failure(ApiFailure::Status {
            status: 401,
            body: r#"{"error":"unauthorized"}"#.to_string(),
        });
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    /// Records the call and pops the next scripted outcome.
    ///
    /// # Panics
    ///
    /// Panics when the script is exhausted; a test that triggers more
    /// calls than it scripted is broken and should fail loudly.
    async fn execute(&self, request: &OutgoingRequest, bearer: Option<&str>) -> ApiResult {
        self.log.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            bearer: bearer.map(|b| b.to_string()),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeTransport: script exhausted, no outcome queued for this call")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_outcomes_pop_in_order() {
        let transport = FakeTransport::new();
        transport.push_ok("first");
        transport.push_unauthorized();

        let request = OutgoingRequest::get("/x");
        let first = transport.execute(&request, None).await;
        assert_eq!(first.unwrap().body, "first");

        let second = transport.execute(&request, None).await;
        assert!(second.unwrap_err().is_unauthorized());
    }

    #[tokio::test]
    async fn test_calls_record_request_and_bearer() {
        let transport = FakeTransport::new();
        transport.push_ok("{}");

        let request = OutgoingRequest::get("/api/mobile/driver/deliveries")
            .with_query("status", "pending");
        transport.execute(&request, Some("tok-1")).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].request.path(), "/api/mobile/driver/deliveries");
        assert_eq!(calls[0].bearer.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    #[should_panic(expected = "script exhausted")]
    async fn test_exhausted_script_panics() {
        let transport = FakeTransport::new();
        let request = OutgoingRequest::get("/x");
        let _ = transport.execute(&request, None).await;
    }
}
