//! Authenticated API client
//!
//! [`ApiClient`] wraps a [`Transport`] with the token lifecycle a signed-in
//! driver needs:
//!
//! - **Attachment** -- before each request, the current access token is
//!   read from the store and attached as a bearer credential. When no token
//!   exists the request goes out unauthenticated and the server's `401`
//!   drives the normal recovery path. Attachment never refreshes.
//! - **Classification** -- a `401` on a path that is itself part of the
//!   auth flow (login, exchange, refresh, logout) or on a request that was
//!   already replayed once is terminal and surfaces unchanged. Any other
//!   `401` enters the refresh protocol.
//! - **Single-flight refresh** -- refresh tokens are rotated by the server
//!   on every use, so concurrent `401`s must not race parallel refresh
//!   calls: each would invalidate the others' new tokens. The client keeps
//!   a single slot holding the in-flight refresh as a shared future; every
//!   caller that hits a refresh-eligible `401` while it is pending awaits
//!   the same handle and receives the same outcome. The slot is cleared
//!   before the future resolves, so a later `401` starts a fresh cycle.
//! - **Replay** -- after a successful refresh each waiting request is
//!   resent exactly once with the new token, and the result of that resend
//!   is final. After a failed refresh the stored credentials are wiped,
//!   the failure sink fires, and each waiter gets its original `401` back.
//!
//! The client never invents a failure shape of its own: callers see either
//! an [`HttpResponse`](crate::api::transport::HttpResponse) or the same
//! [`ApiFailure`](crate::api::transport::ApiFailure) the bare transport
//! would have produced.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::api::auth::AuthTokens;
use crate::api::transport::{ApiResult, OutgoingRequest, Transport};
use crate::auth::sink::AuthFailureSink;
use crate::config::RoutesConfig;
use crate::storage::{StoreKey, TokenStore};

// ---------------------------------------------------------------------------
// Refresh plumbing
// ---------------------------------------------------------------------------

/// Outcome of one refresh cycle, cloned to every caller that awaited it.
#[derive(Debug, Clone)]
enum RefreshOutcome {
    /// The token pair was rotated; waiters replay with this access token.
    Refreshed(String),
    /// No refresh token in the store; each waiter's original `401` stands.
    NoRefreshToken,
    /// The refresh call itself failed; credentials were wiped and the
    /// failure sink has fired. Each waiter's original `401` stands.
    Failed,
}

/// The at-most-one in-flight refresh, shareable across waiters.
type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Slot owning the pending refresh. Held by the client instance, never
/// global.
type RefreshSlot = Arc<Mutex<Option<PendingRefresh>>>;

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Transport wrapper that owns bearer attachment, `401` recovery, and
/// refresh coordination.
///
/// Cloning is cheap; clones share the transport, the store, and the
/// refresh slot, so concurrent requests through any clone coalesce onto
/// the same refresh.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use url::Url;
/// use courier::api::client::ApiClient;
/// use courier::api::transport::http::HttpTransport;
/// use courier::config::RoutesConfig;
/// use courier::storage::KeyringTokenStore;
///
/// let transport = Arc::new(HttpTransport::new(
///     Url::parse("http://localhost:3000").unwrap(),
///     Duration::from_secs(10),
/// ));
/// let store = Arc::new(KeyringTokenStore::new("courier-driver"));
/// let client = ApiClient::new(transport, store, RoutesConfig::default());
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// The HTTP substrate all calls go through.
    transport: Arc<dyn Transport>,
    /// Shared credential store.
    store: Arc<dyn TokenStore>,
    /// Remote path layout, including the auth-path prefix set.
    routes: Arc<RoutesConfig>,
    /// At most one refresh is in flight at any time.
    pending_refresh: RefreshSlot,
    /// Fired once per irrecoverable refresh failure.
    failure_sink: AuthFailureSink,
}

impl ApiClient {
    /// Creates a client over `transport` and `store` using the given path
    /// layout.
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
        routes: RoutesConfig,
    ) -> Self {
        Self {
            transport,
            store,
            routes: Arc::new(routes),
            pending_refresh: Arc::new(Mutex::new(None)),
            failure_sink: AuthFailureSink::new(),
        }
    }

    /// The remote path layout this client was built with.
    pub fn routes(&self) -> &RoutesConfig {
        &self.routes
    }

    /// The failure sink; the session layer registers its callback here.
    pub fn failure_sink(&self) -> &AuthFailureSink {
        &self.failure_sink
    }

    /// Executes `request` with bearer attachment and `401` recovery.
    ///
    /// On a refresh-eligible `401` this suspends until the (possibly
    /// already in-flight) refresh resolves, then either replays the
    /// request once with the new token or returns the original failure.
    /// The replay's outcome is final, even if it is another `401`.
    pub async fn execute(&self, mut request: OutgoingRequest) -> ApiResult {
        // Best-effort attachment: a store read error reads as "no token"
        // and the request goes out unauthenticated.
        let bearer = self.store.get(StoreKey::AccessToken).await.ok().flatten();
        let result = self.transport.execute(&request, bearer.as_deref()).await;

        let failure = match result {
            Ok(response) => return Ok(response),
            Err(failure) => failure,
        };

        if !failure.is_unauthorized() {
            return Err(failure);
        }
        // A 401 from the auth flow itself must not trigger a refresh:
        // refreshing in response to a failed refresh or login would loop.
        if self.routes.is_auth_path(request.path()) {
            return Err(failure);
        }
        // One replay per request. A second 401 is terminal.
        if request.is_retried() {
            return Err(failure);
        }

        match self.await_refresh().await {
            RefreshOutcome::Refreshed(token) => {
                request.mark_retried();
                self.transport.execute(&request, Some(&token)).await
            }
            RefreshOutcome::NoRefreshToken | RefreshOutcome::Failed => Err(failure),
        }
    }

    /// Joins the in-flight refresh, creating it when none exists.
    ///
    /// The slot guard is held from the emptiness check through the store of
    /// the new handle, with no intervening await, so two callers can never
    /// both observe an empty slot and start parallel refresh calls.
    async fn await_refresh(&self) -> RefreshOutcome {
        let pending = {
            let mut slot = self.pending_refresh.lock().await;
            match slot.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let fresh = Self::run_refresh(
                        Arc::clone(&self.transport),
                        Arc::clone(&self.store),
                        Arc::clone(&self.routes),
                        self.failure_sink.clone(),
                        Arc::clone(&self.pending_refresh),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(fresh.clone());
                    fresh
                }
            }
        };
        pending.await
    }

    /// Runs one refresh cycle and clears the slot before resolving.
    ///
    /// Clearing happens inside the future rather than in the creating
    /// caller: a waiter arriving after resolution must find an empty slot
    /// and start a fresh cycle, not observe a stale outcome.
    async fn run_refresh(
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
        routes: Arc<RoutesConfig>,
        sink: AuthFailureSink,
        slot: RefreshSlot,
    ) -> RefreshOutcome {
        let outcome = Self::perform_refresh(transport, store, routes, sink).await;
        *slot.lock().await = None;
        outcome
    }

    /// The actual refresh call: read the refresh token, exchange it, and
    /// persist or wipe depending on the outcome.
    async fn perform_refresh(
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
        routes: Arc<RoutesConfig>,
        sink: AuthFailureSink,
    ) -> RefreshOutcome {
        let refresh_token = match store.get(StoreKey::RefreshToken).await {
            Ok(Some(token)) => token,
            // Absent (or unreadable) refresh token: nothing to exchange,
            // no network call. Callers keep their original 401; the
            // session is not forcibly signed out by this path alone.
            _ => {
                tracing::debug!("401 received but no refresh token is stored");
                return RefreshOutcome::NoRefreshToken;
            }
        };

        let request = OutgoingRequest::post(
            routes.refresh.clone(),
            serde_json::json!({ "refreshToken": refresh_token }),
        );

        // The refresh call goes through the raw transport, never back
        // through execute(): its path is an auth path and must not
        // re-enter the recovery machinery.
        match transport.execute(&request, None).await {
            Ok(response) => match response.json::<AuthTokens>() {
                Ok(tokens) => {
                    // Persist only after the server confirmed the rotation.
                    // A write failure here is logged, not fatal: the new
                    // pair is still valid and waiters replay from memory.
                    if let Err(e) = store.set(StoreKey::AccessToken, &tokens.access_token).await {
                        tracing::warn!("failed to persist access token: {e}");
                    }
                    if let Err(e) = store.set(StoreKey::RefreshToken, &tokens.refresh_token).await {
                        tracing::warn!("failed to persist refresh token: {e}");
                    }
                    tracing::debug!("access token refreshed");
                    RefreshOutcome::Refreshed(tokens.access_token)
                }
                Err(e) => {
                    tracing::warn!("malformed refresh response: {e}");
                    Self::wipe_and_escalate(store, sink).await;
                    RefreshOutcome::Failed
                }
            },
            Err(failure) => {
                tracing::warn!("token refresh failed: {failure}");
                Self::wipe_and_escalate(store, sink).await;
                RefreshOutcome::Failed
            }
        }
    }

    /// Deletes every stored credential and fires the failure sink once.
    async fn wipe_and_escalate(store: Arc<dyn TokenStore>, sink: AuthFailureSink) {
        for key in StoreKey::ALL {
            if let Err(e) = store.delete(key).await {
                tracing::warn!("failed to delete {:?} during auth wipe: {e}", key);
            }
        }
        sink.notify();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
