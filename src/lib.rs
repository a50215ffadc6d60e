//! Courier - delivery driver companion library
//!
//! Courier is the client stack behind the `courier` CLI: magic-link
//! authentication against the delivery API, transparent access-token
//! refresh shared across concurrent requests, and typed wrappers for the
//! driver's delivery views.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: transport, the authenticated client, and endpoint wrappers
//! - `auth`: session state projection and failure escalation
//! - `storage`: credential store trait with keyring and in-memory backends
//! - `config`: configuration loading and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use url::Url;
//! use courier::api::client::ApiClient;
//! use courier::api::transport::http::HttpTransport;
//! use courier::auth::AuthSession;
//! use courier::storage::KeyringTokenStore;
//! use courier::Config;
//!
//! # async fn example() -> courier::Result<()> {
//! let config = Config::default();
//! let store = Arc::new(KeyringTokenStore::new(&config.storage.service));
//! let transport = Arc::new(HttpTransport::new(
//!     Url::parse(&config.api.base_url)?,
//!     Duration::from_secs(config.api.timeout_seconds),
//! ));
//! let client = ApiClient::new(transport, store.clone(), config.routes.clone());
//! let session = AuthSession::new(store);
//! session.install_failure_handler(&client);
//! session.load().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use api::client::ApiClient;
pub use auth::session::AuthSession;
pub use config::Config;
pub use error::{CourierError, Result};
