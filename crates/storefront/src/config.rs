//! # Configuration
//!
//! [`StorefrontConfig`] collects every tunable of the client: where the API lives, how long a
//! request may take, the page size and the timing of the rate-limited UI events.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults ([`StorefrontConfig::default`])
//! 2. an optional TOML file
//! 3. `STOREFRONT_*` environment variables, e.g. `STOREFRONT_PAGE_SIZE=12`
//!
//! ```toml
//! api_base_url = "https://shop.example.com/v1"
//! page_size = 12
//! quick_lookup_debounce_ms = 250
//! ```

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "STOREFRONT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    /// Products per page. Fixed for the lifetime of the page store.
    pub page_size: u32,
    /// Quiet period after the last keystroke before suggestions are fetched.
    pub quick_lookup_debounce_ms: u64,
    pub resize_throttle_ms: u64,
    /// Viewports narrower than this render the virtualized list.
    pub virtualize_below_px: u32,
    /// Assumed viewport width until the first resize event arrives.
    pub initial_viewport_px: u32,
    /// Mailbox size of every store actor.
    pub channel_buffer: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.example.com".to_string(),
            request_timeout_ms: 5000,
            page_size: 8,
            quick_lookup_debounce_ms: 300,
            resize_throttle_ms: 200,
            virtualize_below_px: 768,
            initial_viewport_px: 1280,
            channel_buffer: 32,
        }
    }
}

impl StorefrontConfig {
    /// Loads the configuration from `file` (if any) and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, None)
    }

    /// Like [`load`](Self::load), but reads variables from `env` instead of the process
    /// environment when it is given.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let config: StorefrontConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be at least 1".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn page_size(&self) -> NonZeroU32 {
        NonZeroU32::new(self.page_size).unwrap_or(NonZeroU32::MIN)
    }

    pub fn quick_lookup_debounce(&self) -> Duration {
        Duration::from_millis(self.quick_lookup_debounce_ms)
    }

    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Option<HashMap<String, String>> {
        Some(HashMap::new())
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = StorefrontConfig::load_from(None, no_env()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.page_size().get(), 8);
        assert_eq!(config.quick_lookup_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_base_url = \"https://shop.test/v1\"\npage_size = 12").unwrap();

        let config = StorefrontConfig::load_from(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.api_base_url, "https://shop.test/v1");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.resize_throttle_ms, 200);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 12").unwrap();
        let env = HashMap::from([("STOREFRONT_PAGE_SIZE".to_string(), "20".to_string())]);

        let config = StorefrontConfig::load_from(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let env = HashMap::from([("STOREFRONT_PAGE_SIZE".to_string(), "0".to_string())]);
        let result = StorefrontConfig::load_from(None, Some(env));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = StorefrontConfig::load_from(Some(Path::new("/nonexistent/storefront.toml")), no_env());
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
