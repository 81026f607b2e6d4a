//! OpenAI-compatible speech provider (primary)
//!
//! Posts a flat JSON body to `{base_url}/audio/speech` with bearer
//! authentication and returns the encoded audio as-is.
//!
//! # Supported response formats
//! - mp3, opus, aac, flac, wav, pcm

use async_trait::async_trait;
use domain::SynthesisRequest;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{http_client, read_audio_response};
use crate::config::{PrimaryProviderConfig, SynthesisConfig};
use crate::error::SpeechError;
use crate::payload::RequestBuilder;
use crate::ports::SpeechSynthesizer;
use crate::types::{AudioFormat, EncodedAudio, ProviderKind};
use crate::voices::VoiceSelector;

/// Primary provider speaking the OpenAI `/audio/speech` dialect
#[derive(Debug, Clone)]
pub struct OpenAiTtsProvider {
    client: Client,
    config: PrimaryProviderConfig,
    builder: RequestBuilder,
}

impl OpenAiTtsProvider {
    /// Create a new provider
    ///
    /// Missing credentials are not an error here; `synthesize` reports the
    /// provider as unavailable instead.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &SynthesisConfig) -> Result<Self, SpeechError> {
        let client = http_client(config.primary.timeout_ms)?;

        Ok(Self {
            client,
            config: config.primary.clone(),
            builder: RequestBuilder::from_config(config),
        })
    }

    /// Build the TTS endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    /// Codec requested via `response_format`
    fn requested_format(&self) -> AudioFormat {
        AudioFormat::from_codec_name(&self.config.response_format).unwrap_or(AudioFormat::Mp3)
    }
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Prefer the API's own error message over the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body).map_or_else(|_| body.to_string(), |e| e.error.message)
}

#[async_trait]
impl SpeechSynthesizer for OpenAiTtsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Primary
    }

    fn is_configured(&self) -> bool {
        self.config.api_key_str().is_some()
    }

    #[instrument(
        skip(self, request),
        fields(provider = "primary", text_len = request.text.char_count(), accent = %request.accent)
    )]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<EncodedAudio, SpeechError> {
        let Some(api_key) = self.config.api_key_str() else {
            return Err(SpeechError::ProviderUnavailable {
                provider: ProviderKind::Primary,
                reason: "API key not configured".to_string(),
            });
        };

        let voice = VoiceSelector::select(
            ProviderKind::Primary,
            request.accent,
            request.voice_override(),
        );
        let payload =
            self.builder
                .build(ProviderKind::Primary, &request.text, &voice, request.rate);
        let content_type = payload.content_type();
        let body = payload.into_body()?;

        debug!(voice = %voice.voice_id, speed = request.rate.multiplier(), "Requesting speech");

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| SpeechError::transport(ProviderKind::Primary, self.config.timeout_ms, &e))?;

        read_audio_response(
            ProviderKind::Primary,
            response,
            self.requested_format(),
            self.config.timeout_ms,
            api_error_message,
        )
        .await
    }
}
