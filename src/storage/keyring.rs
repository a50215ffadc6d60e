//! Token persistence via OS keyring
//!
//! Stores each [`StoreKey`] as a separate keyring entry under a
//! configurable service name, so multiple installations (or a test run)
//! can coexist without clobbering each other's credentials.

use crate::error::{CourierError, Result};
use crate::storage::{StoreKey, TokenStore};

/// Credential store backed by the OS native keyring.
///
/// # Examples
///
/// ```no_run
/// use courier::storage::{KeyringTokenStore, StoreKey, TokenStore};
///
/// # async fn example() -> courier::Result<()> {
/// let store = KeyringTokenStore::new("courier-driver");
/// store.set(StoreKey::AccessToken, "tok").await?;
/// let loaded = store.get(StoreKey::AccessToken).await?;
/// assert_eq!(loaded.as_deref(), Some("tok"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    /// Keyring service name; each key becomes a `(service, entry)` pair.
    service: String,
}

impl KeyringTokenStore {
    /// Creates a store namespaced under `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: StoreKey) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key.entry_name())
            .map_err(|e| CourierError::Keyring(e).into())
    }
}

#[async_trait::async_trait]
impl TokenStore for KeyringTokenStore {
    async fn get(&self, key: StoreKey) -> Result<Option<String>> {
        let entry = self.entry(key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CourierError::Keyring(e).into()),
        }
    }

    async fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        let entry = self.entry(key)?;
        entry
            .set_password(value)
            .map_err(|e| CourierError::Keyring(e).into())
    }

    async fn delete(&self, key: StoreKey) -> Result<()> {
        let entry = self.entry(key)?;
        match entry.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CourierError::Keyring(e).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests  (require system keyring; skipped in CI)
// ---------------------------------------------------------------------------
