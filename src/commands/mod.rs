//! CLI command handlers
//!
//! Each submodule implements the handlers for one command group. All of
//! them run over an [`AppContext`], the wired-up client stack: keyring
//! store, HTTP transport, authenticated client, and session.

use std::sync::Arc;
use std::time::Duration;

use crate::api::client::ApiClient;
use crate::api::transport::http::HttpTransport;
use crate::auth::AuthSession;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{KeyringTokenStore, TokenStore};

pub mod auth;
pub mod deliveries;
pub mod ping;

/// The wired-up client stack shared by every command handler.
pub struct AppContext {
    /// Loaded and validated configuration.
    pub config: Config,
    /// Authenticated API client.
    pub client: ApiClient,
    /// Session projection over the same store the client uses.
    pub session: AuthSession,
}

impl AppContext {
    /// Builds the full stack from `config` and projects the session from
    /// stored credentials.
    pub async fn build(config: Config) -> Result<Self> {
        let store: Arc<dyn TokenStore> =
            Arc::new(KeyringTokenStore::new(config.storage.service.clone()));

        let base_url = url::Url::parse(&config.api.base_url)?;
        let transport = Arc::new(HttpTransport::new(
            base_url,
            Duration::from_secs(config.api.timeout_seconds),
        ));

        let client = ApiClient::new(transport, Arc::clone(&store), config.routes.clone());
        let session = AuthSession::new(store);
        session.install_failure_handler(&client);
        session.load().await?;

        Ok(Self {
            config,
            client,
            session,
        })
    }
}
