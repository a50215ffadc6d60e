//! Configuration management for Courier
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file, with sensible defaults for every field so that a
//! missing or partial config file still yields a working setup.

use crate::error::{CourierError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Courier
///
/// Holds everything the client stack needs: where the API lives, which
/// paths make up the remote contract, and how credentials are stored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Remote path layout
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Credential storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the delivery API server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Remote path layout
///
/// Every path the client talks to, plus the set of prefixes that mark a
/// path as part of the authentication flow itself. Requests to a path
/// under one of these prefixes are never retried after a `401` and never
/// trigger a token refresh (refreshing in response to a failed login or
/// refresh call would loop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Path prefixes excluded from the refresh-and-retry cycle
    #[serde(default = "default_auth_prefixes")]
    pub auth_prefixes: Vec<String>,

    /// Magic-link request endpoint
    #[serde(default = "default_request_link_path")]
    pub request_link: String,

    /// Magic-link token exchange endpoint
    #[serde(default = "default_exchange_path")]
    pub exchange: String,

    /// Access token refresh endpoint
    #[serde(default = "default_refresh_path")]
    pub refresh: String,

    /// Remote session termination endpoint
    #[serde(default = "default_logout_path")]
    pub logout: String,

    /// Assigned deliveries listing endpoint
    #[serde(default = "default_deliveries_path")]
    pub deliveries: String,

    /// Reachability probe endpoint
    #[serde(default = "default_ping_path")]
    pub ping: String,
}

fn default_auth_prefixes() -> Vec<String> {
    vec!["/api/mobile/auth/".to_string()]
}

fn default_request_link_path() -> String {
    "/api/mobile/auth/request-link".to_string()
}

fn default_exchange_path() -> String {
    "/api/mobile/auth/exchange".to_string()
}

fn default_refresh_path() -> String {
    "/api/mobile/auth/refresh".to_string()
}

fn default_logout_path() -> String {
    "/api/mobile/auth/logout".to_string()
}

fn default_deliveries_path() -> String {
    "/api/mobile/driver/deliveries".to_string()
}

fn default_ping_path() -> String {
    "/api/mobile/ping".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            auth_prefixes: default_auth_prefixes(),
            request_link: default_request_link_path(),
            exchange: default_exchange_path(),
            refresh: default_refresh_path(),
            logout: default_logout_path(),
            deliveries: default_deliveries_path(),
            ping: default_ping_path(),
        }
    }
}

impl RoutesConfig {
    /// Returns `true` when `path` falls under one of the configured
    /// auth-path prefixes.
    pub fn is_auth_path(&self, path: &str) -> bool {
        self.auth_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// Credential storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Service name under which tokens are stored in the OS keyring
    #[serde(default = "default_storage_service")]
    pub service: String,
}

fn default_storage_service() -> String {
    "courier-driver".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            service: default_storage_service(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// A missing file is not an error: all fields have defaults, so the
    /// default configuration is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Io`] if the file exists but cannot be read,
    /// or [`CourierError::Yaml`] if it is not valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(CourierError::Io)?;
        let config: Self = serde_yaml::from_str(&raw).map_err(CourierError::Yaml)?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Config`] when:
    ///
    /// - the base URL is not a valid `http`/`https` URL
    /// - the request timeout is zero
    /// - the auth prefix set is empty
    /// - the refresh or logout path is not covered by an auth prefix
    ///   (either would make the refresh protocol re-enter itself)
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url)
            .map_err(|e| CourierError::Config(format!("invalid base_url: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CourierError::Config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(CourierError::Config("timeout_seconds must be at least 1".into()).into());
        }

        if self.routes.auth_prefixes.is_empty() {
            return Err(CourierError::Config("auth_prefixes must not be empty".into()).into());
        }

        for (name, path) in [("refresh", &self.routes.refresh), ("logout", &self.routes.logout)] {
            if !self.routes.is_auth_path(path) {
                return Err(CourierError::Config(format!(
                    "{name} path '{path}' is not covered by any auth prefix"
                ))
                .into());
            }
        }

        Ok(())
    }
}
