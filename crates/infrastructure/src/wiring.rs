//! Service composition from application configuration

use std::sync::Arc;

use ai_speech::{SpeechError, SynthesisService};
use tracing::info;

use crate::cache::{MokaCacheConfig, MokaSynthesisCache};
use crate::config::AppConfig;

/// Build the synthesis service, attaching the in-memory cache when enabled
pub fn build_synthesis_service(config: &AppConfig) -> Result<SynthesisService, SpeechError> {
    let service = SynthesisService::from_config(&config.speech)?;

    if !config.cache.enabled {
        return Ok(service);
    }

    info!(
        ttl_secs = config.cache.ttl_secs,
        max_capacity_mb = config.cache.max_capacity_mb,
        "Synthesis cache enabled"
    );
    let cache = MokaSynthesisCache::with_config(MokaCacheConfig::from(&config.cache));
    Ok(service.with_cache(Arc::new(cache), config.cache.ttl()))
}
