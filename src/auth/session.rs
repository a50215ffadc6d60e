//! Session state projection
//!
//! [`AuthSession`] is the application's view of "who is signed in":
//! an authenticated flag plus the cached driver profile, projected from
//! the credential store at startup and updated by sign-in, sign-out, and
//! the client's failure sink. UI layers (here, the CLI command handlers)
//! gate on this state instead of poking at the store directly.

use std::sync::{Arc, RwLock};

use crate::api::auth::{self, DriverProfile, ExchangeResponse};
use crate::api::client::ApiClient;
use crate::error::Result;
use crate::storage::{StoreKey, TokenStore};

#[derive(Debug, Default)]
struct SessionState {
    authenticated: bool,
    driver: Option<DriverProfile>,
}

/// Authenticated/unauthenticated state plus the cached driver profile.
///
/// Cloning shares the state, so a clone captured by the failure handler
/// observes the same session the command handlers read.
#[derive(Debug, Clone)]
pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    state: Arc<RwLock<SessionState>>,
}

impl AuthSession {
    /// Creates an unauthenticated session over `store`. Call
    /// [`load`](Self::load) to project the stored credentials.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Projects session state from the store: authenticated when an access
    /// token exists, with the cached profile if one deserializes.
    ///
    /// A malformed cached profile reads as absent rather than failing the
    /// whole startup.
    pub async fn load(&self) -> Result<()> {
        let authenticated = self.store.get(StoreKey::AccessToken).await?.is_some();

        let driver = match self.store.get(StoreKey::DriverProfile).await? {
            Some(raw) => match serde_json::from_str::<DriverProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("ignoring malformed cached profile: {e}");
                    None
                }
            },
            None => None,
        };

        let mut state = self.state.write().unwrap();
        state.authenticated = authenticated;
        state.driver = driver;
        Ok(())
    }

    /// Whether a driver is currently signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().authenticated
    }

    /// The cached driver profile, if signed in.
    ///
    /// The profile is written at sign-in and never updated by a token
    /// refresh (the refresh response carries no profile), so it can lag a
    /// server-side change until the next sign-in.
    pub fn driver(&self) -> Option<DriverProfile> {
        self.state.read().unwrap().driver.clone()
    }

    /// Persists a fresh sign-in: the token pair and the profile, then the
    /// state flip.
    pub async fn sign_in(&self, exchange: ExchangeResponse) -> Result<()> {
        self.store
            .set(StoreKey::AccessToken, &exchange.tokens.access_token)
            .await?;
        self.store
            .set(StoreKey::RefreshToken, &exchange.tokens.refresh_token)
            .await?;
        let profile_json = serde_json::to_string(&exchange.driver)?;
        self.store
            .set(StoreKey::DriverProfile, &profile_json)
            .await?;

        let mut state = self.state.write().unwrap();
        state.authenticated = true;
        state.driver = Some(exchange.driver);
        tracing::info!("driver signed in");
        Ok(())
    }

    /// Signs out: best-effort remote session termination, then local wipe.
    ///
    /// The remote call only happens when a refresh token exists and its
    /// failure is ignored -- local state is cleared regardless. Calling
    /// this while already signed out is safe and makes no network call.
    pub async fn sign_out(&self, client: &ApiClient) -> Result<()> {
        if let Ok(Some(refresh_token)) = self.store.get(StoreKey::RefreshToken).await {
            if let Err(e) = auth::logout_remote(client, &refresh_token).await {
                tracing::debug!("remote logout failed, clearing locally anyway: {e}");
            }
        }

        for key in StoreKey::ALL {
            self.store.delete(key).await?;
        }

        let mut state = self.state.write().unwrap();
        state.authenticated = false;
        state.driver = None;
        tracing::info!("driver signed out");
        Ok(())
    }

    /// Registers this session on `client`'s failure sink.
    ///
    /// When a refresh fails irrecoverably the client has already wiped the
    /// stored credentials, so the handler only flips the in-memory state:
    /// no remote notification is attempted (the remote call failing is why
    /// this path fired in the first place).
    pub fn install_failure_handler(&self, client: &ApiClient) {
        let state = Arc::clone(&self.state);
        client.failure_sink().register(Box::new(move || {
            let mut guard = state.write().unwrap();
            guard.authenticated = false;
            guard.driver = None;
            tracing::warn!("session ended: token refresh failed irrecoverably");
        }));
    }
}
