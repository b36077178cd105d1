use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Config baked into the bundle at build time.
const EMBEDDED: &str = include_str!("../../demai.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid log level: {0}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// localStorage key holding the connected wallet address
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Seconds between `eth_accounts` liveness checks on the dashboard
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketConfig {
    /// Events per page on the Market tab
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Max events shown on the Explore tab
    #[serde(default = "default_explore_limit")]
    pub explore_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct CatalogConfig {
    /// Base URL of a JSON catalog API. Empty = built-in fixtures.
    #[serde(default)]
    pub api_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_storage_key() -> String {
    "walletAddress".to_string()
}
fn default_poll_interval_secs() -> u64 {
    30
}
fn default_page_size() -> usize {
    8
}
fn default_explore_limit() -> usize {
    7
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            explore_limit: default_explore_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session: SessionConfig::default(),
            market: MarketConfig::default(),
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(contents)?;
        // A zero page size would make every page empty.
        if config.market.page_size == 0 {
            config.market.page_size = default_page_size();
        }
        Ok(config)
    }

    /// Load the config embedded in the bundle.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.session.poll_interval_secs.max(1))
    }

    pub fn has_remote_catalog(&self) -> bool {
        !self.catalog.api_url.trim().is_empty()
    }

    pub fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        self.logging
            .level
            .parse::<tracing::Level>()
            .map_err(|_| ConfigError::LogLevel(self.logging.level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session.storage_key, "walletAddress");
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.market.page_size, 8);
        assert_eq!(config.market.explore_limit, 7);
        assert!(!config.has_remote_catalog());
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse(
            r#"
            [session]
            poll_interval_secs = 5

            [market]
            page_size = 4

            [catalog]
            api_url = "https://api.demai.example"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.session.storage_key, "walletAddress");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.market.page_size, 4);
        assert_eq!(config.market.explore_limit, 7);
        assert!(config.has_remote_catalog());
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let config = Config::parse("[market]\npage_size = 0").unwrap();
        assert_eq!(config.market.page_size, 8);
    }

    #[test]
    fn test_bad_log_level() {
        let config = Config::parse("[logging]\nlevel = \"loud\"").unwrap();
        assert!(matches!(config.log_level(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_embedded_config_parses() {
        assert!(Config::embedded().is_ok());
    }

    #[test]
    fn test_config_usable_as_launch_context() {
        fn root_context<T: Clone + Send + Sync + 'static>(value: T) -> T {
            value.clone()
        }
        let config = Config::embedded().unwrap();
        assert_eq!(root_context(config.clone()), config);
    }
}
