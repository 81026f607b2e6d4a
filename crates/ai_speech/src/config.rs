//! Configuration for speech synthesis

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the whole synthesis pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Primary (flat JSON) provider
    #[serde(default)]
    pub primary: PrimaryProviderConfig,

    /// Secondary (SSML) provider
    #[serde(default)]
    pub secondary: SecondaryProviderConfig,

    /// External transcoder
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

/// Primary provider: OpenAI-compatible `/audio/speech` endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct PrimaryProviderConfig {
    /// Bearer API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL (for custom endpoints)
    #[serde(default = "default_primary_base_url")]
    pub base_url: String,

    /// Text-to-speech model
    #[serde(default = "default_primary_model")]
    pub model: String,

    /// Requested response encoding
    #[serde(default = "default_primary_response_format")]
    pub response_format: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

/// Secondary provider: Azure-style SSML endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct SecondaryProviderConfig {
    /// Subscription key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub subscription_key: Option<SecretString>,

    /// Service region, e.g. "westeurope"
    #[serde(default)]
    pub region: Option<String>,

    /// Full endpoint URL overriding the region-derived one
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Value of the output-format header
    #[serde(default = "default_secondary_output_format")]
    pub output_format: String,

    /// Expressive style hint placed in the markup
    #[serde(default = "default_secondary_style")]
    pub style: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

/// FFmpeg-based transcoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// FFmpeg binary (defaults to "ffmpeg" in PATH)
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Directory for staging files (defaults to the system temp dir)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// Process timeout in milliseconds
    #[serde(default = "default_transcode_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_primary_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_primary_model() -> String {
    "tts-1".to_string()
}

fn default_primary_response_format() -> String {
    "mp3".to_string()
}

fn default_secondary_output_format() -> String {
    "audio-24khz-48kbitrate-mono-mp3".to_string()
}

fn default_secondary_style() -> String {
    "friendly".to_string()
}

const fn default_provider_timeout_ms() -> u64 {
    15_000
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

const fn default_transcode_timeout_ms() -> u64 {
    20_000
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_primary_base_url(),
            model: default_primary_model(),
            response_format: default_primary_response_format(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl Default for SecondaryProviderConfig {
    fn default() -> Self {
        Self {
            subscription_key: None,
            region: None,
            endpoint: None,
            output_format: default_secondary_output_format(),
            style: default_secondary_style(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            work_dir: None,
            timeout_ms: default_transcode_timeout_ms(),
        }
    }
}

impl PrimaryProviderConfig {
    /// Get the API key as a string reference, ignoring blank values
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }
}

impl SecondaryProviderConfig {
    /// Get the subscription key as a string reference, ignoring blank values
    #[must_use]
    pub fn subscription_key_str(&self) -> Option<&str> {
        self.subscription_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the region, ignoring blank values
    #[must_use]
    pub fn region_str(&self) -> Option<&str> {
        self.region.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }

    /// Resolve the synthesis endpoint URL
    ///
    /// Returns `None` when neither an explicit endpoint nor a region is set.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<String> {
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            return Some(endpoint.trim_end_matches('/').to_string());
        }
        self.region_str().map(|region| {
            format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1")
        })
    }
}

impl TranscoderConfig {
    /// Directory staging files are written to
    #[must_use]
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl SynthesisConfig {
    /// Collect configuration problems that are worth a warning at startup
    ///
    /// Missing credentials are not errors: an unconfigured provider is
    /// skipped at request time.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.primary.api_key_str().is_none() {
            warnings.push("Primary provider has no API key and will be skipped".to_string());
        }
        if self.secondary.subscription_key_str().is_none() || self.secondary.region_str().is_none()
        {
            warnings.push(
                "Secondary provider needs a subscription key and a region and will be skipped"
                    .to_string(),
            );
        }
        if self.primary.timeout_ms == 0 || self.secondary.timeout_ms == 0 {
            warnings.push("Provider timeout of 0ms rejects every request".to_string());
        }
        if self.transcoder.timeout_ms == 0 {
            warnings.push("Transcoder timeout of 0ms rejects every request".to_string());
        }

        warnings
    }
}

impl std::fmt::Debug for PrimaryProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimaryProviderConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("response_format", &self.response_format)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl std::fmt::Debug for SecondaryProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondaryProviderConfig")
            .field(
                "subscription_key",
                &if self.subscription_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("output_format", &self.output_format)
            .field("style", &self.style)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
