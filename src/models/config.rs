//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the visa portal (injected, never hardcoded)
    pub base_url: String,

    /// HTTP and fingerprint behavior settings
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Build a configuration for the given portal base URL, with defaults
    /// for everything else.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: ClientConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::config("base_url is empty"));
        }
        url::Url::parse(&self.base_url)?;
        if self.client.timeout_secs == 0 {
            return Err(AppError::config("client.timeout_secs must be > 0"));
        }
        if self.client.delay_min_ms > self.client.delay_max_ms {
            return Err(AppError::config(
                "client.delay_min_ms must not exceed client.delay_max_ms",
            ));
        }
        if self.client.user_agents.is_empty() {
            return Err(AppError::config("client.user_agents is empty"));
        }
        if self.client.accept_languages.is_empty() {
            return Err(AppError::config("client.accept_languages is empty"));
        }
        Ok(())
    }
}

/// HTTP client and fingerprint rotation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Lower bound of the pre-submission delay in milliseconds
    #[serde(default = "defaults::delay_min")]
    pub delay_min_ms: u64,

    /// Upper bound of the pre-submission delay in milliseconds
    #[serde(default = "defaults::delay_max")]
    pub delay_max_ms: u64,

    /// User-Agent pool for fingerprint rotation
    #[serde(default = "defaults::user_agents")]
    pub user_agents: Vec<String>,

    /// Accept-Language pool for fingerprint rotation
    #[serde(default = "defaults::accept_languages")]
    pub accept_languages: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::timeout(),
            delay_min_ms: defaults::delay_min(),
            delay_max_ms: defaults::delay_max(),
            user_agents: defaults::user_agents(),
            accept_languages: defaults::accept_languages(),
        }
    }
}

mod defaults {
    pub fn timeout() -> u64 {
        10
    }
    pub fn delay_min() -> u64 {
        1000
    }
    pub fn delay_max() -> u64 {
        3000
    }

    // Browser strings observed in real desktop/mobile traffic. The portal's
    // anti-automation heuristics key on header diversity, so the pool mixes
    // Chrome, Firefox, Safari, Edge, Opera and mobile variants.
    pub fn user_agents() -> Vec<String> {
        [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) Gecko/20100101 Firefox/123.0",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Safari/605.1.15",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36 Edg/122.0.0.0",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36 OPR/108.0.0.0",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_3_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Mobile/15E148 Safari/604.1",
            "Mozilla/5.0 (Linux; Android 14; SM-S918B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.6261.64 Mobile Safari/537.36",
            "Mozilla/5.0 (iPad; CPU OS 17_3_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Mobile/15E148 Safari/604.1",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn accept_languages() -> Vec<String> {
        [
            "en-US,en;q=0.9",
            "en-GB,en;q=0.9",
            "en-CA,en;q=0.9",
            "ko-KR,ko;q=0.9,en-US;q=0.8",
            "ja-JP,ja;q=0.9,en-US;q=0.8",
            "zh-CN,zh;q=0.9,en-US;q=0.8",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::new("https://www.visa.go.kr").validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let config = Config::new("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::new("https://www.visa.go.kr");
        config.client.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_delay_window() {
        let mut config = Config::new("https://www.visa.go.kr");
        config.client.delay_min_ms = 500;
        config.client.delay_max_ms = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_pools() {
        let mut config = Config::new("https://www.visa.go.kr");
        config.client.user_agents.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://www.visa.go.kr\"\n\n[client]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_url, "https://www.visa.go.kr");
        assert_eq!(config.client.timeout_secs, 5);
        assert_eq!(config.client.delay_max_ms, 3000);
        assert!(config.validate().is_ok());
    }
}
