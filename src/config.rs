use crate::processor::ExtractionOptions;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Application configuration loaded from relay-offers.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub identity: IdentityConfig,
    pub extraction: ExtractionConfig,
    pub polling: PollingConfig,
}

/// Relay node connection and retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8645".to_string(),
            timeout_seconds: 10,
            max_retries: 3,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

/// Who "me" is when partitioning offers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub debug_mode: bool,
    pub native_schema_is_mine: bool,
    pub content_topic: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            native_schema_is_mine: true,
            content_topic: "/swap/1/offers/proto".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    pub interval_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from relay-offers.toml and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Same as [`AppConfig::load`], with an additional required config file
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let relay = RelayConfig::default();
        let extraction = ExtractionConfig::default();
        let polling = PollingConfig::default();

        let mut builder = Config::builder()
            // Start with default values
            .set_default("relay.url", relay.url)?
            .set_default("relay.timeout_seconds", relay.timeout_seconds)?
            .set_default("relay.max_retries", relay.max_retries as i64)?
            .set_default("relay.initial_backoff_ms", relay.initial_backoff_ms)?
            .set_default("relay.backoff_multiplier", relay.backoff_multiplier)?
            .set_default("relay.max_backoff_seconds", relay.max_backoff_seconds)?
            .set_default("identity.handle", "")?
            .set_default("extraction.debug_mode", extraction.debug_mode)?
            .set_default(
                "extraction.native_schema_is_mine",
                extraction.native_schema_is_mine,
            )?
            .set_default("extraction.content_topic", extraction.content_topic)?
            .set_default("polling.interval_seconds", polling.interval_seconds)?
            // Load from config.toml / relay-offers.toml if they exist
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("relay-offers").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // RELAY_OFFERS_RELAY__URL, RELAY_OFFERS_EXTRACTION__DEBUG_MODE, ...
        let config = builder
            .add_source(
                Environment::with_prefix("RELAY_OFFERS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Check for specific environment variables with custom names
        if let Ok(handle) = env::var("RELAY_OFFERS_HANDLE") {
            app_config.identity.handle = handle;
        }

        if let Ok(url) = env::var("RELAY_OFFERS_RELAY_URL") {
            app_config.relay.url = url;
        }

        app_config.validate()?;

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Try to load config for defaults, but don't fail if not found
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.relay.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "Relay URL not configured. Set RELAY_OFFERS_RELAY_URL or relay.url in relay-offers.toml".to_string(),
            ));
        }
        if self.polling.interval_seconds == 0 {
            return Err(ConfigError::Message(
                "polling.interval_seconds must be greater than 0".to_string(),
            ));
        }
        if self.relay.backoff_multiplier < 1.0 {
            return Err(ConfigError::Message(format!(
                "relay.backoff_multiplier must be at least 1.0, got {}",
                self.relay.backoff_multiplier
            )));
        }
        Ok(())
    }

    /// Extraction options as configured, before any CLI overrides
    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions::new(self.identity.handle.clone(), self.extraction.debug_mode)
            .with_native_schema_is_mine(self.extraction.native_schema_is_mine)
            .with_content_topic(self.extraction.content_topic.clone())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
