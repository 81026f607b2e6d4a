//! Synthesis façade
//!
//! The single entry point: validate, consult the optional cache, orchestrate
//! providers, transcode, and hand back the canonical waveform.

use std::sync::Arc;
use std::time::Duration;

use domain::SynthesisRequest;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::cache::synthesis_cache_key;
use crate::config::SynthesisConfig;
use crate::error::SpeechError;
use crate::orchestrator::SynthesisOrchestrator;
use crate::ports::{AudioTranscoder, SynthesisCache};
use crate::providers::{AzureTtsProvider, OpenAiTtsProvider};
use crate::transcoder::FfmpegTranscoder;
use crate::types::CanonicalWaveform;

/// Default lifetime of cached waveforms
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Component status for readiness reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Readiness {
    /// Primary provider has credentials
    pub primary_configured: bool,
    /// Secondary provider has credentials
    pub secondary_configured: bool,
    /// The transcoder binary runs
    pub transcoder_available: bool,
}

impl Readiness {
    /// Ready when the transcoder works and any provider can be called
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.transcoder_available && (self.primary_configured || self.secondary_configured)
    }
}

/// Text-to-canonical-waveform pipeline
pub struct SynthesisService {
    orchestrator: SynthesisOrchestrator,
    transcoder: Arc<dyn AudioTranscoder>,
    cache: Option<Arc<dyn SynthesisCache>>,
    cache_ttl: Duration,
}

impl std::fmt::Debug for SynthesisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisService")
            .field("orchestrator", &self.orchestrator)
            .field("cache", &self.cache.is_some())
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}

impl SynthesisService {
    /// Create a service from its parts
    pub fn new(orchestrator: SynthesisOrchestrator, transcoder: Arc<dyn AudioTranscoder>) -> Self {
        Self {
            orchestrator,
            transcoder,
            cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Wire the real providers and FFmpeg from configuration
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if an HTTP client cannot be built.
    pub fn from_config(config: &SynthesisConfig) -> Result<Self, SpeechError> {
        let primary = Arc::new(OpenAiTtsProvider::new(config)?);
        let secondary = Arc::new(AzureTtsProvider::new(config)?);
        let transcoder = Arc::new(FfmpegTranscoder::new(&config.transcoder));

        Ok(Self::new(
            SynthesisOrchestrator::new(primary, secondary),
            transcoder,
        ))
    }

    /// Inject a cache for finished waveforms
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn SynthesisCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    /// The injected cache, if any
    pub fn cache(&self) -> Option<&Arc<dyn SynthesisCache>> {
        self.cache.as_ref()
    }

    /// Synthesize raw caller input into a canonical waveform
    ///
    /// Only empty text is rejected; every other parameter is sanitized.
    ///
    /// # Errors
    ///
    /// - `SpeechError::InvalidInput` for empty or whitespace-only text,
    ///   before any provider is called
    /// - `SpeechError::AllProvidersFailed` when both providers fail
    /// - `SpeechError::Transcode` when the transcoder fails
    pub async fn synthesize(
        &self,
        text: &str,
        accent: Option<&str>,
        rate: Option<f64>,
        voice_override: Option<&str>,
    ) -> Result<CanonicalWaveform, SpeechError> {
        let request = SynthesisRequest::from_raw(text, accent, rate, voice_override)?;
        self.synthesize_request(&request).await
    }

    /// Synthesize an already-normalized request
    #[instrument(skip(self, request), fields(
        text_len = request.text.char_count(),
        accent = %request.accent,
        rate = %request.rate,
        voice_override = request.voice_override().is_some()
    ))]
    pub async fn synthesize_request(
        &self,
        request: &SynthesisRequest,
    ) -> Result<CanonicalWaveform, SpeechError> {
        let cache_key = self.cache.as_ref().map(|_| synthesis_cache_key(request));

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Some(waveform) = Self::cached(cache.as_ref(), key).await {
                debug!("Serving synthesized audio from cache");
                return Ok(waveform);
            }
        }

        let audio = self.orchestrator.orchestrate(request).await?;
        let waveform = self.transcoder.transcode(&audio).await?;

        debug!(
            provider = %audio.provider(),
            duration_ms = waveform.duration_ms(),
            size = waveform.size_bytes(),
            "Synthesis complete"
        );

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Err(e) = cache
                .set_bytes(key, waveform.data().to_vec(), self.cache_ttl)
                .await
            {
                warn!("Failed to cache synthesized audio: {e}");
            }
        }

        Ok(waveform)
    }

    /// Look up a cached waveform; read failures and invalid entries are misses
    async fn cached(cache: &dyn SynthesisCache, key: &str) -> Option<CanonicalWaveform> {
        match cache.get_bytes(key).await {
            Ok(Some(bytes)) => match CanonicalWaveform::from_wav_bytes(bytes) {
                Ok(waveform) => Some(waveform),
                Err(e) => {
                    warn!("Discarding invalid cache entry: {e}");
                    if let Err(e) = cache.invalidate(key).await {
                        debug!("Failed to invalidate cache entry: {e}");
                    }
                    None
                },
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed, synthesizing instead: {e}");
                None
            },
        }
    }

    /// Report which components are usable
    pub async fn readiness(&self) -> Readiness {
        let [primary, secondary] = self.orchestrator.providers();
        Readiness {
            primary_configured: primary.is_configured(),
            secondary_configured: secondary.is_configured(),
            transcoder_available: self.transcoder.is_available().await,
        }
    }
}
