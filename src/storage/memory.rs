//! In-memory token storage
//!
//! A thread-safe, async store over a `HashMap`, used by the test suite and
//! by ephemeral sessions that should leave nothing behind on disk.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::Result;
use crate::storage::{StoreKey, TokenStore};

/// Thread-safe in-memory credential store.
///
/// Cloning is cheap and clones share the same underlying map, so a test
/// can keep a handle to assert on state the code under test mutates.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: Arc<RwLock<HashMap<StoreKey, String>>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a token pair, the usual starting
    /// point for tests exercising the refresh protocol.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(StoreKey::AccessToken, access.to_string());
        entries.insert(StoreKey::RefreshToken, refresh.to_string());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        self.entries.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn delete(&self, key: StoreKey) -> Result<()> {
        self.entries.write().await.remove(&key);
        Ok(())
    }
}
