//! Configuration loading for the signal router
//!
//! Supports a JSON configuration file for:
//! - Server bind address
//! - Upstream provider (base URL, timeout, endpoint templates)
//! - Service metadata reported by `/` and `/health`
//!
//! Every field has a default, so `{}` is a valid configuration. Selected
//! environment variables override the file (see [`RouterConfig::apply_env`]).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::application::SignalEndpoints;

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_API_BASE: &str = "SIGMAGRID_API_BASE";
pub const ENV_TIMEOUT_MS: &str = "SIGMAGRID_TIMEOUT_MS";

/// Root configuration for the signal router
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub service: ServiceInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Signal provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Documentation link advertised by `GET /`
    #[serde(default = "default_docs_url")]
    pub docs_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub endpoints: SignalEndpoints,
}

fn default_base_url() -> String {
    "https://api.sigmagrid.app".to_string()
}

fn default_docs_url() -> String {
    "https://sigmagrid.app/docs/agents".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            docs_url: default_docs_url(),
            timeout_ms: default_timeout_ms(),
            endpoints: SignalEndpoints::default(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Metadata reported by `GET /` and `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_service_version")]
    pub version: String,
    #[serde(default = "default_service_description")]
    pub description: String,
    /// Service identifier in health responses
    #[serde(default = "default_health_name")]
    pub health_name: String,
}

fn default_service_name() -> String {
    "Signal Router Agent".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_service_description() -> String {
    "Example consumer agent for SigmaGrid API".to_string()
}

fn default_health_name() -> String {
    "signal-router-agent".to_string()
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
            description: default_service_description(),
            health_name: default_health_name(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override fields from environment-style variables
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{} must be a port number", ENV_PORT)))?;
        }
        if let Some(base_url) = lookup(ENV_API_BASE) {
            self.upstream.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.upstream.timeout_ms = timeout.parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a number of milliseconds", ENV_TIMEOUT_MS))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.upstream.base_url).map_err(|e| {
            ConfigError::Invalid(format!("upstream.base_url '{}': {}", self.upstream.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "upstream.base_url '{}' cannot be a base URL",
                self.upstream.base_url
            )));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "upstream.timeout_ms must be greater than zero".to_string(),
            ));
        }

        for (name, template) in self.upstream.endpoints.iter() {
            if !template.has_placeholder() {
                return Err(ConfigError::Invalid(format!(
                    "upstream.endpoints.{} '{}' has no {{ticker}} placeholder",
                    name, template
                )));
            }
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
