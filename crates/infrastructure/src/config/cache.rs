//! Synthesis cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Synthesis cache configuration
///
/// Disabled by default; every request is synthesized fresh unless enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether canonical waveforms are cached
    #[serde(default)]
    pub enabled: bool,

    /// Time-to-live for cached waveforms in seconds (default: 1 hour)
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Maximum cache size in megabytes
    #[serde(default = "default_max_capacity_mb")]
    pub max_capacity_mb: u64,
}

const fn default_ttl() -> u64 {
    60 * 60 // 1 hour
}

const fn default_max_capacity_mb() -> u64 {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: default_ttl(),
            max_capacity_mb: default_max_capacity_mb(),
        }
    }
}

impl CacheConfig {
    /// Get the TTL as a Duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
