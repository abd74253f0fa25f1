//
//  campus-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads, saves and edits the client configuration, stored as TOML in the
//! platform configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/campus/config.toml`
//! - **macOS**: `~/Library/Application Support/campus/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\campus\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api/v1"
//! timeout_secs = 30
//! token = "eyJhbGciOi..."
//!
//! [retry]
//! max_retries = 3
//! delay_ms = 1000
//!
//! [cache]
//! default_ttl_secs = 300
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `CAMPUS_API_URL` | `api.base_url` |
//! | `CAMPUS_TOKEN` | `api.token` |
//!
//! Overrides apply to the effective configuration only and are never
//! written back to disk.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use campus_client::config::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load_effective()?;
//! let client = config.client()?;
//! let challenge = client.challenges().get("x1").await.into_result()?;
//! # Ok(())
//! # }
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::api::{
    ApiClient, ClientContext, HeaderInterceptor, HttpTransport, InterceptorChain, LoggingInterceptor,
    ResponseCache, RetryPolicy, DEFAULT_BASE_URL,
};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "CAMPUS_API_URL";

/// Environment variable overriding `api.token`.
pub const ENV_TOKEN: &str = "CAMPUS_TOKEN";

/// Every key understood by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "api.token",
    "retry.max_retries",
    "retry.delay_ms",
    "cache.default_ttl_secs",
];

/// Complete client configuration.
///
/// Every section falls back to its defaults when missing from the file, so
/// an empty file is a valid configuration.
///
/// ```rust
/// use campus_client::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
/// assert_eq!(config.retry.max_retries, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Retry policy for reads.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token saved by `campus auth login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

/// Retry settings.
///
/// `max_retries` counts total attempts, so `3` means one try and two
/// retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff; attempt `n` waits `delay_ms * n`.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// The equivalent [`RetryPolicy`].
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.delay_ms))
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL of entries stored without an explicit one.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
        }
    }
}

impl Config {
    /// Loads the configuration file, or defaults if it does not exist.
    ///
    /// Environment overrides are not applied; use this when the result may
    /// be saved again.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// file exists but is not valid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration file and applies environment overrides.
    pub fn load_effective() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Loads from an explicit path, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `CAMPUS_API_URL` and `CAMPUS_TOKEN` as returned by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = present(ENV_API_URL) {
            debug!(base_url = %url, "base URL overridden from environment");
            self.api.base_url = url;
        }
        if let Some(token) = present(ENV_TOKEN) {
            debug!("token overridden from environment");
            self.api.token = Some(token);
        }
    }

    /// Reads a value by dotted key. Unset optional values are `None`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "api.token" => self.api.token.clone(),
            "retry.max_retries" => Some(self.retry.max_retries.to_string()),
            "retry.delay_ms" => Some(self.retry.delay_ms.to_string()),
            "cache.default_ttl_secs" => Some(self.cache.default_ttl_secs.to_string()),
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, KEYS.join(", ")),
        };
        Ok(value)
    }

    /// Writes a value by dotted key, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                validate_base_url(value)?;
                self.api.base_url = value.to_string();
            }
            "api.timeout_secs" => self.api.timeout_secs = parse_number(key, value)?,
            "api.token" => self.api.token = Some(value.to_string()).filter(|t| !t.is_empty()),
            "retry.max_retries" => self.retry.max_retries = parse_number(key, value)?,
            "retry.delay_ms" => self.retry.delay_ms = parse_number(key, value)?,
            "cache.default_ttl_secs" => self.cache.default_ttl_secs = parse_number(key, value)?,
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, KEYS.join(", ")),
        }
        Ok(())
    }

    /// Every key with its current value.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        KEYS.iter()
            .map(|key| (*key, self.get(key).ok().flatten()))
            .collect()
    }

    /// Builds an API client from this configuration.
    ///
    /// The client logs every call at debug level, identifies itself with an
    /// `X-Client` header and starts authenticated when a token is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be created.
    pub fn client(&self) -> Result<ApiClient> {
        validate_base_url(&self.api.base_url)?;

        let transport = HttpTransport::new(Duration::from_secs(self.api.timeout_secs))?;
        let cache = ResponseCache::with_default_ttl(Duration::from_secs(self.cache.default_ttl_secs));
        let interceptors = InterceptorChain::new()
            .with_request(HeaderInterceptor::new(
                "X-Client",
                format!("{}/{}", crate::APP_NAME, crate::VERSION),
            ))
            .with_request(LoggingInterceptor)
            .with_response(LoggingInterceptor);

        let mut context = ClientContext::new(self.api.base_url.clone())
            .with_interceptors(interceptors)
            .with_cache(Arc::new(cache));
        if let Some(token) = &self.api.token {
            context = context.with_auth_token(token.clone());
        }

        Ok(ApiClient::with_transport(Arc::new(transport), context).with_retry_policy(self.retry.policy()))
    }
}

fn validate_base_url(value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("Invalid base URL '{}'", value))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Base URL must use http or https, got '{}'", url.scheme());
    }
    Ok(())
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' expects a non-negative number, got '{}'", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("api.base_url", "https://campus.example.com/api/v1").unwrap();
        config.set("retry.delay_ms", "250").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://campus.example.com/api/v1");
        assert_eq!(loaded.retry.delay_ms, 250);
        assert_eq!(loaded.retry.max_retries, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[retry]\nmax_retries = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.delay_ms, 1000);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let env: HashMap<&str, &str> = [(ENV_API_URL, "http://staging:9000/api"), (ENV_TOKEN, "")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://staging:9000/api");
        assert_eq!(config.api.token, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api.base_url", "not a url").is_err());
        assert!(config.set("api.base_url", "ftp://files.example.com").is_err());
        assert!(config.set("retry.max_retries", "-1").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_entries_cover_every_key() {
        let config = Config::default();
        let entries = config.entries();
        assert_eq!(entries.len(), KEYS.len());
        assert_eq!(entries[2], ("api.token", None));
    }

    #[test]
    fn test_client_carries_token_and_policy() {
        let mut config = Config::default();
        config.api.token = Some("abc".to_string());
        config.retry.max_retries = 5;

        let client = config.client().unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.retry_policy().max_retries, 5);
        assert_eq!(client.context().interceptors().request_len(), 2);
        assert_eq!(client.context().interceptors().response_len(), 1);
    }
}
