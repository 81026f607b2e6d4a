//! Moka in-memory synthesis cache
//!
//! Thread-safe waveform cache bounded by total byte size. Each entry expires
//! after the TTL given when it was stored.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use ai_speech::{SpeechError, SynthesisCache};
use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::{debug, instrument};

use crate::config::CacheConfig;

/// Default maximum cache size in MB
const DEFAULT_MAX_CAPACITY_MB: u64 = 64;

/// Configuration for the Moka cache
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Maximum capacity in megabytes
    pub max_capacity_mb: u64,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity_mb: DEFAULT_MAX_CAPACITY_MB,
        }
    }
}

impl From<&CacheConfig> for MokaCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            max_capacity_mb: config.max_capacity_mb,
        }
    }
}

#[derive(Clone)]
struct CachedEntry {
    data: Arc<Vec<u8>>,
    ttl: Duration,
}

/// Expires each entry after its own TTL
struct PerEntryTtl;

impl Expiry<String, CachedEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based synthesis cache
pub struct MokaSynthesisCache {
    cache: Cache<String, CachedEntry>,
}

impl std::fmt::Debug for MokaSynthesisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSynthesisCache")
            .field("entries", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}

impl MokaSynthesisCache {
    /// Create a new cache with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a new cache with custom configuration
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let max_capacity_bytes = config.max_capacity_mb * 1024 * 1024;

        let cache = Cache::builder()
            .max_capacity(max_capacity_bytes)
            .weigher(|_key: &String, value: &CachedEntry| -> u32 {
                value.data.len().try_into().unwrap_or(u32::MAX)
            })
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

impl Default for MokaSynthesisCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SynthesisCache for MokaSynthesisCache {
    #[instrument(skip(self), level = "debug")]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SpeechError> {
        if let Some(entry) = self.cache.get(key).await {
            debug!(key = %key, "Cache hit");
            Ok(Some(entry.data.as_ref().clone()))
        } else {
            debug!(key = %key, "Cache miss");
            Ok(None)
        }
    }

    #[instrument(skip(self, value), level = "debug", fields(size = value.len()))]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), SpeechError> {
        if ttl.is_zero() {
            debug!(key = %key, "Zero TTL, not caching");
            return Ok(());
        }
        let entry = CachedEntry {
            data: Arc::new(value),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        debug!(key = %key, "Cache set");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn invalidate(&self, key: &str) -> Result<(), SpeechError> {
        self.cache.invalidate(key).await;
        debug!(key = %key, "Cache invalidated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn set_and_get_bytes() {
        let cache = MokaSynthesisCache::new();
        cache.set_bytes("tts:a", b"RIFF".to_vec(), TTL).await.unwrap();

        let result = cache.get_bytes("tts:a").await.unwrap();
        assert_eq!(result, Some(b"RIFF".to_vec()));
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let cache = MokaSynthesisCache::new();
        assert!(cache.get_bytes("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = MokaSynthesisCache::new();
        cache.set_bytes("key", vec![1, 2, 3], TTL).await.unwrap();

        cache.invalidate("key").await.unwrap();

        assert!(cache.get_bytes("key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entry_expires_after_its_ttl() {
        let cache = MokaSynthesisCache::new();
        cache
            .set_bytes("short", vec![1], Duration::from_millis(50))
            .await
            .unwrap();
        cache.set_bytes("long", vec![2], TTL).await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.get_bytes("short").await.unwrap().is_none());
        assert_eq!(cache.get_bytes("long").await.unwrap(), Some(vec![2]));
    }

    #[tokio::test]
    async fn zero_ttl_is_not_stored() {
        let cache = MokaSynthesisCache::new();
        cache.set_bytes("key", vec![1], Duration::ZERO).await.unwrap();
        assert!(cache.get_bytes("key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entries_are_weighed_by_byte_length() {
        let cache = MokaSynthesisCache::new();
        cache.set_bytes("key", vec![0; 1000], TTL).await.unwrap();

        cache.cache.run_pending_tasks().await;

        assert_eq!(cache.cache.entry_count(), 1);
        assert_eq!(cache.cache.weighted_size(), 1000);
    }

    #[tokio::test]
    async fn capacity_bounds_total_bytes() {
        let cache = MokaSynthesisCache::with_config(MokaCacheConfig { max_capacity_mb: 1 });
        for i in 0..8 {
            cache
                .set_bytes(&format!("key{i}"), vec![0; 256 * 1024], TTL)
                .await
                .unwrap();
        }

        cache.cache.run_pending_tasks().await;

        assert!(cache.cache.weighted_size() <= 1024 * 1024);
    }

    #[test]
    fn config_from_cache_settings() {
        let settings = CacheConfig {
            max_capacity_mb: 8,
            ..CacheConfig::default()
        };
        assert_eq!(MokaCacheConfig::from(&settings).max_capacity_mb, 8);
    }

    #[test]
    fn debug_output() {
        let debug = format!("{:?}", MokaSynthesisCache::default());
        assert!(debug.contains("MokaSynthesisCache"));
        assert!(debug.contains("entries"));
    }
}
