//! Configuration schema definitions.
//!
//! All types derive Serde traits so a config file can be partial; anything
//! missing falls back to the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Listen address used when no domain is passed to `serve`.
pub const DEFAULT_LOCAL_ADDR: &str = "127.0.0.1:8090";

/// Listen address used when at least one domain is passed to `serve`.
pub const DEFAULT_PUBLIC_ADDR: &str = "0.0.0.0:80";

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the application's durable state (logs, db files, ...).
    pub data_dir: PathBuf,

    /// Development mode: verbose logging to the console.
    pub is_dev: bool,

    /// How long the losing side of the shutdown race may take to wind down.
    pub shutdown_timeout_secs: u64,

    /// HTTP server settings.
    pub serve: ServeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("maple_data"),
            is_dev: false,
            shutdown_timeout_secs: 5,
            serve: ServeConfig::default(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServeConfig {
    /// TCP address to listen on (e.g. "127.0.0.1:80"). Resolved by
    /// [`ServeConfig::resolve_addr`] when unset.
    pub http_addr: Option<String>,

    /// CORS allowed origins; `"*"` allows any.
    pub allowed_origins: Vec<String>,

    /// Total time allowed for a single request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            http_addr: None,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 600,
        }
    }
}

impl ServeConfig {
    /// The address to bind, falling back on whether domains were requested.
    pub fn resolve_addr(&self, has_domains: bool) -> String {
        match &self.http_addr {
            Some(addr) if !addr.is_empty() => addr.clone(),
            _ if has_domains => DEFAULT_PUBLIC_ADDR.to_string(),
            _ => DEFAULT_LOCAL_ADDR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_addr_defaults() {
        let config = ServeConfig::default();
        assert_eq!(config.resolve_addr(false), "127.0.0.1:8090");
        assert_eq!(config.resolve_addr(true), "0.0.0.0:80");
    }

    #[test]
    fn test_resolve_addr_explicit_wins() {
        let config = ServeConfig {
            http_addr: Some("127.0.0.1:9999".into()),
            ..Default::default()
        };
        assert_eq!(config.resolve_addr(true), "127.0.0.1:9999");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("is_dev = true\n[serve]\nhttp_addr = \"0.0.0.0:1\"\n").unwrap();
        assert!(config.is_dev);
        assert_eq!(config.data_dir, PathBuf::from("maple_data"));
        assert_eq!(config.serve.allowed_origins, vec!["*"]);
        assert_eq!(config.serve.http_addr.as_deref(), Some("0.0.0.0:1"));
    }
}
