//! Infrastructure layer - configuration, logging, and cache adapters
//!
//! Loads `AppConfig` from file and environment, installs the tracing
//! subscriber, and provides the Moka-backed `SynthesisCache`.

pub mod cache;
pub mod config;
pub mod logging;
pub mod wiring;

pub use cache::{MokaCacheConfig, MokaSynthesisCache};
pub use config::{
    AppConfig, CacheConfig, ConfigError, LogFormat, LoggingConfig, ServerConfig,
};
pub use logging::{LoggingError, init_logging};
pub use wiring::build_synthesis_service;
