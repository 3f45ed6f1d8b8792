use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default location of the optional configuration file.
pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for rotated log files. Console logging only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Root of the Launchpad web service, including the API version.
    #[serde(default = "default_launchpad_api_root")]
    pub launchpad_api_root: String,

    #[serde(default = "default_distribution")]
    pub distribution: String,

    /// Base URL of the Prometheus push gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_launchpad_api_root() -> String {
    "https://api.launchpad.net/devel/".to_string()
}

fn default_distribution() -> String {
    "ubuntu".to_string()
}

fn default_gateway_url() -> String {
    "http://localhost:9091".to_string()
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            launchpad_api_root: default_launchpad_api_root(),
            distribution: default_distribution(),
            gateway_url: default_gateway_url(),
        }
    }
}

impl CollectorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|reason| Error::Config {
            path: path.display().to_string(),
            reason,
        })
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = CollectorConfig::from_toml("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.distribution, "ubuntu");
        assert_eq!(config.launchpad_api_root, "https://api.launchpad.net/devel/");
        assert_eq!(config.gateway_url, "http://localhost:9091");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = CollectorConfig::from_toml(
            r#"
            log_level = "debug"
            log_dir = "/var/log/sru-metrics"
            gateway_url = "http://pushgateway.internal:9091"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/sru-metrics")));
        assert_eq!(config.gateway_url, "http://pushgateway.internal:9091");
        assert_eq!(config.distribution, "ubuntu");
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        assert!(CollectorConfig::from_toml("log_level = [").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = CollectorConfig::load_or_default("/nonexistent/sru-metrics.toml").unwrap();
        assert_eq!(config.gateway_url, default_gateway_url());
    }
}
