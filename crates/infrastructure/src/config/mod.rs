//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `cache`: synthesis cache settings
//! - `logging`: log filter and output format
//!
//! Speech provider and transcoder settings live in `ai_speech::SynthesisConfig`.

mod cache;
mod logging;
mod server;

use ai_speech::SynthesisConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use cache::CacheConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TTS_GATEWAY";

/// Conventional variable holding the primary provider key
pub const PRIMARY_KEY_VAR: &str = "OPENAI_API_KEY";

/// Conventional variable holding the secondary provider key
pub const SECONDARY_KEY_VAR: &str = "AZURE_SPEECH_KEY";

/// Conventional variable holding the secondary provider region
pub const SECONDARY_REGION_VAR: &str = "AZURE_SPEECH_REGION";

const fn default_true() -> bool {
    true
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or deserializing a source failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Speech providers and transcoder
    #[serde(default)]
    pub speech: SynthesisConfig,

    /// Synthesis cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    ///
    /// Environment variables use the `TTS_GATEWAY_` prefix and `__` for
    /// nesting, e.g. `TTS_GATEWAY_SERVER__PORT=8080` or
    /// `TTS_GATEWAY_SPEECH__PRIMARY__MODEL=tts-1-hd`. Missing credentials are
    /// then filled from the conventional provider variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific file (extension optional)
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(path).required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_env_credentials();
        Ok(config)
    }

    /// Fill empty credential fields from the process environment
    pub fn apply_env_credentials(&mut self) {
        self.apply_credentials_from(|name| std::env::var(name).ok());
    }

    /// Fill empty credential fields from `lookup`
    ///
    /// Values already present are never overridden; blank lookups are ignored.
    pub fn apply_credentials_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.speech.primary.api_key_str().is_none() {
            if let Some(key) = lookup(PRIMARY_KEY_VAR) {
                debug!("Using primary provider key from {PRIMARY_KEY_VAR}");
                self.speech.primary.api_key = Some(SecretString::from(key));
            }
        }

        if self.speech.secondary.subscription_key_str().is_none() {
            if let Some(key) = lookup(SECONDARY_KEY_VAR) {
                debug!("Using secondary provider key from {SECONDARY_KEY_VAR}");
                self.speech.secondary.subscription_key = Some(SecretString::from(key));
            }
        }

        if self.speech.secondary.region_str().is_none() {
            if let Some(region) = lookup(SECONDARY_REGION_VAR) {
                debug!("Using secondary provider region from {SECONDARY_REGION_VAR}");
                self.speech.secondary.region = Some(region);
            }
        }
    }

    /// Collect non-fatal configuration problems to log at startup
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.speech.warnings();

        if self.speech.primary.api_key_str().is_none()
            && (self.speech.secondary.subscription_key_str().is_none()
                || self.speech.secondary.region_str().is_none())
        {
            warnings.push("No speech provider is configured; every request will fail".to_string());
        }
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            warnings.push("Cache is enabled with a TTL of 0s and will never hit".to_string());
        }
        if self.server.max_body_size_bytes == 0 {
            warnings.push("Request body limit of 0 bytes rejects every POST".to_string());
        }

        warnings
    }
}
