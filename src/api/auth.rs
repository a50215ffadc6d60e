//! Magic-link authentication endpoints
//!
//! Wire types and typed wrappers for the auth portion of the delivery API.
//! All request and response field names are camelCase on the wire.
//!
//! Every path in this module is covered by the configured auth-path
//! prefixes, so a `401` from any of these calls surfaces directly instead
//! of triggering a refresh cycle.

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::transport::OutgoingRequest;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A rotated token pair as returned by the exchange and refresh endpoints.
///
/// `expires_in` (seconds) is accepted on the wire but not persisted: the
/// client is `401`-driven rather than expiry-driven, so the server's
/// rejection of a stale token is what triggers a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Rotated long-lived token for minting new access tokens.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

/// The signed-in driver's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    /// Stable driver identifier.
    pub id: String,
    /// Display name; the server may not have one on file.
    pub name: Option<String>,
    /// Sign-in email address.
    pub email: String,
}

/// Response of a successful magic-link token exchange: the initial token
/// pair plus the driver it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeResponse {
    /// The initial token pair.
    #[serde(flatten)]
    pub tokens: AuthTokens,
    /// Profile of the driver the link was issued to.
    pub driver: DriverProfile,
}

/// Acknowledgement of a magic-link request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequested {
    /// Whether the server accepted the request. Always `true` for known
    /// and unknown addresses alike, so the endpoint cannot be used to
    /// probe which emails have accounts.
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// Endpoint wrappers
// ---------------------------------------------------------------------------

/// Asks the server to email a one-time sign-in link to `email`.
pub async fn request_magic_link(client: &ApiClient, email: &str) -> Result<LinkRequested> {
    let request = OutgoingRequest::post(
        client.routes().request_link.clone(),
        serde_json::json!({ "email": email }),
    );
    let response = client.execute(request).await?;
    response.json()
}

/// Exchanges the one-time token from an emailed link for a token pair and
/// the driver's profile.
///
/// The caller (normally [`AuthSession::sign_in`](crate::auth::session::AuthSession::sign_in))
/// is responsible for persisting the result.
pub async fn exchange_token(client: &ApiClient, token: &str) -> Result<ExchangeResponse> {
    let request = OutgoingRequest::post(
        client.routes().exchange.clone(),
        serde_json::json!({ "token": token }),
    );
    let response = client.execute(request).await?;
    response.json()
}

/// Notifies the server that `refresh_token`'s session is over.
///
/// Used by sign-out, which treats this as best-effort: local credentials
/// are cleared whether or not the server heard us.
pub async fn logout_remote(client: &ApiClient, refresh_token: &str) -> Result<()> {
    let request = OutgoingRequest::post(
        client.routes().logout.clone(),
        serde_json::json!({ "refreshToken": refresh_token }),
    );
    client.execute(request).await?;
    Ok(())
}
