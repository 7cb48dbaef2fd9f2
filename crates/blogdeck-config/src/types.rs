//! Configuration types.
//!
//! Every field in the file is optional so layers can be merged field by
//! field; [`BlogdeckConfig::resolve`] fills in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use blogdeck_client::Flavor;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding `[server] base_url`.
pub const BASE_URL_ENV: &str = "BLOGDECK_API_BASE_URL";

// ─────────────────────────────────────────────────────────────────────────────
// File model
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration as written in `config.toml` / `blogdeck.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogdeckConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

/// `[server]`: where the backend lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// `[client]`: which application to behave as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<Flavor>,
}

/// `[storage]`: where session state is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl BlogdeckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: BlogdeckConfig) {
        if let Some(server) = other.server {
            let base = self.server.get_or_insert_with(Default::default);
            if server.base_url.is_some() {
                base.base_url = server.base_url;
            }
            if server.timeout_secs.is_some() {
                base.timeout_secs = server.timeout_secs;
            }
        }

        if let Some(client) = other.client
            && client.flavor.is_some()
        {
            self.client.get_or_insert_with(Default::default).flavor = client.flavor;
        }

        if let Some(storage) = other.storage
            && storage.path.is_some()
        {
            self.storage.get_or_insert_with(Default::default).path = storage.path;
        }
    }

    /// Fill in defaults and apply the process environment.
    ///
    /// `config_dir` anchors the default storage file.
    pub fn resolve(&self, config_dir: &Path) -> Result<Settings> {
        self.resolve_with_env(config_dir, |key| std::env::var(key).ok())
    }

    pub(crate) fn resolve_with_env(
        &self,
        config_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings> {
        let server = self.server.clone().unwrap_or_default();

        let base_url = env(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(server.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "server.base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", base_url),
            });
        }

        let timeout_secs = server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "server.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let flavor = self
            .client
            .as_ref()
            .and_then(|c| c.flavor)
            .unwrap_or_default();

        let storage_path = self
            .storage
            .as_ref()
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| default_storage_path(config_dir, flavor));

        Ok(Settings {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            flavor,
            storage_path,
        })
    }
}

/// `<config dir>/storage-<flavor>.json`.
pub fn default_storage_path(config_dir: &Path, flavor: Flavor) -> PathBuf {
    config_dir.join(format!("storage-{}.json", flavor))
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolved settings
// ─────────────────────────────────────────────────────────────────────────────

/// Concrete settings after layering, env overrides, and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub flavor: Flavor,
    pub storage_path: PathBuf,
}

impl Settings {
    /// Switch flavor, moving the storage file along with it when it was
    /// left at its default location.
    pub fn with_flavor(mut self, flavor: Flavor, config_dir: &Path) -> Self {
        if self.storage_path == default_storage_path(config_dir, self.flavor) {
            self.storage_path = default_storage_path(config_dir, flavor);
        }
        self.flavor = flavor;
        self
    }
}
