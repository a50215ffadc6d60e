//! Server reachability probe

use crate::api::client::ApiClient;
use crate::api::transport::{ApiFailure, OutgoingRequest};

/// Outcome of a reachability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingOutcome {
    /// The server answered 2xx.
    Ok(u16),
    /// The server was reached but answered with an error status.
    Reached(u16),
    /// The server could not be reached at all.
    Unreachable(String),
}

/// Probes the configured ping path.
///
/// Works signed-out: an auth error still proves the server is reachable,
/// which is the only question this call answers.
pub async fn ping(client: &ApiClient) -> PingOutcome {
    let request = OutgoingRequest::get(client.routes().ping.clone());
    match client.execute(request).await {
        Ok(response) => PingOutcome::Ok(response.status),
        Err(ApiFailure::Status { status, .. }) => PingOutcome::Reached(status),
        Err(ApiFailure::Network(reason)) => PingOutcome::Unreachable(reason),
    }
}
