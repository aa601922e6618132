use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::checkout::KeyFormat;
use crate::domain::DEFAULT_LOW_STOCK_THRESHOLD;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, e.g. "http://localhost:8080/api"
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub key_format: KeyFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_ms", default_timeout_ms())?
            .set_default("catalog.low_stock_threshold", DEFAULT_LOW_STOCK_THRESHOLD)?
            .set_default("checkout.key_format", "uuid")?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Environment-specific file, e.g. config/staging.toml
            .add_source(
                File::from(config_dir.join(
                    std::env::var("SHOP_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // SHOP_API__BASE_URL, SHOP_LOGGING__LEVEL, ...
            .add_source(
                Environment::with_prefix("SHOP")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Configuration with built-in defaults only
    pub fn default_config(base_url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.to_string(),
                timeout_ms: default_timeout_ms(),
            },
            catalog: CatalogConfig::default(),
            checkout: CheckoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("api.base_url is not a valid URL: {e}")),
        }

        if self.api.timeout_ms == 0 {
            errors.push("api.timeout_ms must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
