//! Credential storage abstraction
//!
//! This module defines the [`TokenStore`] trait that all credential store
//! implementations must satisfy. Concrete implementations live in
//! submodules:
//!
//! - [`keyring::KeyringTokenStore`] -- persists values in the operating
//!   system's native credential store (Keychain on macOS, Secret Service on
//!   Linux, Windows Credential Manager on Windows).
//! - [`memory::MemoryTokenStore`] -- in-memory store for tests and
//!   ephemeral sessions.
//!
//! # Design
//!
//! The trait is intentionally minimal: asynchronous `get`/`set`/`delete`
//! per [`StoreKey`], each operation individually atomic, with no multi-key
//! transactionality. Missing data reads as `Ok(None)`, never as an error,
//! so callers can distinguish "not signed in yet" from a genuine storage
//! fault.

use crate::error::Result;

pub mod keyring;
pub mod memory;

pub use self::keyring::KeyringTokenStore;
pub use self::memory::MemoryTokenStore;

/// The three entries the client keeps in credential storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Short-lived bearer token attached to outgoing requests.
    AccessToken,
    /// Long-lived token used to mint new access tokens; rotated on every
    /// successful refresh.
    RefreshToken,
    /// Cached driver profile JSON, written at sign-in.
    DriverProfile,
}

impl StoreKey {
    /// Stable entry name used by persistent store implementations.
    pub fn entry_name(self) -> &'static str {
        match self {
            StoreKey::AccessToken => "access-token",
            StoreKey::RefreshToken => "refresh-token",
            StoreKey::DriverProfile => "driver-profile",
        }
    }

    /// All keys, in wipe order.
    pub const ALL: [StoreKey; 3] = [
        StoreKey::AccessToken,
        StoreKey::RefreshToken,
        StoreKey::DriverProfile,
    ];
}

/// Abstraction over credential storage backends.
///
/// All operations are `async` so that implementations backed by slow or
/// remote storage do not block the Tokio executor. Implementations must be
/// shareable across tasks (`Send + Sync`) since every in-flight request
/// reads the store.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when no value has been stored, allowing callers
    /// to distinguish absence from a storage fault.
    async fn get(&self, key: StoreKey) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: StoreKey, value: &str) -> Result<()>;

    /// Deletes the value stored under `key`.
    ///
    /// Deleting an absent key is a no-op, so this is safe to call even when
    /// the caller is not sure whether a value was previously stored.
    async fn delete(&self, key: StoreKey) -> Result<()>;
}
