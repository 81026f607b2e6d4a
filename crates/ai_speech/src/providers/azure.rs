//! Azure-style SSML speech provider (secondary)
//!
//! Posts an SSML document to a region-scoped endpoint, authenticated by a
//! subscription-key header. The desired encoding is declared through the
//! output-format header.

use async_trait::async_trait;
use domain::SynthesisRequest;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, instrument};

use super::{http_client, read_audio_response};
use crate::config::{SecondaryProviderConfig, SynthesisConfig};
use crate::error::SpeechError;
use crate::payload::RequestBuilder;
use crate::ports::SpeechSynthesizer;
use crate::types::{AudioFormat, EncodedAudio, ProviderKind};
use crate::voices::VoiceSelector;

/// Header carrying the subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Header declaring the desired audio encoding
pub const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";

/// Secondary provider speaking SSML
#[derive(Debug, Clone)]
pub struct AzureTtsProvider {
    client: Client,
    config: SecondaryProviderConfig,
    builder: RequestBuilder,
}

impl AzureTtsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &SynthesisConfig) -> Result<Self, SpeechError> {
        let client = http_client(config.secondary.timeout_ms)?;

        Ok(Self {
            client,
            config: config.secondary.clone(),
            builder: RequestBuilder::from_config(config),
        })
    }

    /// Codec implied by the output-format header value
    ///
    /// Output formats end in the codec name, e.g.
    /// `audio-24khz-48kbitrate-mono-mp3` or `riff-16khz-16bit-mono-pcm`.
    fn requested_format(&self) -> AudioFormat {
        self.config
            .output_format
            .rsplit('-')
            .next()
            .and_then(AudioFormat::from_codec_name)
            .unwrap_or(AudioFormat::Mp3)
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureTtsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Secondary
    }

    fn is_configured(&self) -> bool {
        self.config.subscription_key_str().is_some() && self.config.endpoint_url().is_some()
    }

    #[instrument(
        skip(self, request),
        fields(provider = "secondary", text_len = request.text.char_count(), accent = %request.accent)
    )]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<EncodedAudio, SpeechError> {
        let Some(key) = self.config.subscription_key_str() else {
            return Err(SpeechError::ProviderUnavailable {
                provider: ProviderKind::Secondary,
                reason: "subscription key not configured".to_string(),
            });
        };
        let Some(url) = self.config.endpoint_url() else {
            return Err(SpeechError::ProviderUnavailable {
                provider: ProviderKind::Secondary,
                reason: "region not configured".to_string(),
            });
        };

        let voice = VoiceSelector::select(
            ProviderKind::Secondary,
            request.accent,
            request.voice_override(),
        );
        let payload =
            self.builder
                .build(ProviderKind::Secondary, &request.text, &voice, request.rate);
        let content_type = payload.content_type();
        let body = payload.into_body()?;

        debug!(voice = %voice.voice_id, rate = request.rate.percent_delta(), "Requesting speech");

        let response = self
            .client
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header(OUTPUT_FORMAT_HEADER, &self.config.output_format)
            .header(CONTENT_TYPE, content_type)
            .header(USER_AGENT, concat!("tts-gateway/", env!("CARGO_PKG_VERSION")))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                SpeechError::transport(ProviderKind::Secondary, self.config.timeout_ms, &e)
            })?;

        read_audio_response(
            ProviderKind::Secondary,
            response,
            self.requested_format(),
            self.config.timeout_ms,
            ToString::to_string,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config(key: Option<&str>, region: Option<&str>) -> SynthesisConfig {
        let mut config = SynthesisConfig::default();
        config.secondary.subscription_key = key.map(|k| SecretString::from(k.to_string()));
        config.secondary.region = region.map(ToString::to_string);
        config
    }

    #[test]
    fn requested_format_parses_output_format() {
        let mut cfg = config(Some("key"), Some("eastus"));
        let provider = AzureTtsProvider::new(&cfg).unwrap();
        assert_eq!(provider.requested_format(), AudioFormat::Mp3);

        cfg.secondary.output_format = "ogg-24khz-16bit-mono-opus".to_string();
        let provider = AzureTtsProvider::new(&cfg).unwrap();
        assert_eq!(provider.requested_format(), AudioFormat::Opus);

        cfg.secondary.output_format = "riff-16khz-16bit-mono-pcm".to_string();
        let provider = AzureTtsProvider::new(&cfg).unwrap();
        assert_eq!(provider.requested_format(), AudioFormat::Wav);
    }

    #[test]
    fn is_configured_needs_key_and_region() {
        assert!(!AzureTtsProvider::new(&config(None, Some("eastus"))).unwrap().is_configured());
        assert!(!AzureTtsProvider::new(&config(Some("key"), None)).unwrap().is_configured());
        assert!(AzureTtsProvider::new(&config(Some("key"), Some("eastus"))).unwrap().is_configured());
    }

    #[tokio::test]
    async fn missing_region_is_unavailable() {
        let provider = AzureTtsProvider::new(&config(Some("key"), None)).unwrap();
        let request = SynthesisRequest::from_raw("Hello", None, None, None).unwrap();

        let err = provider.synthesize(&request).await.unwrap_err();

        let SpeechError::ProviderUnavailable { provider, reason } = err else {
            unreachable!("Expected ProviderUnavailable");
        };
        assert_eq!(provider, ProviderKind::Secondary);
        assert!(reason.contains("region"));
    }

    #[tokio::test]
    async fn missing_key_is_unavailable() {
        let provider = AzureTtsProvider::new(&config(None, Some("eastus"))).unwrap();
        let request = SynthesisRequest::from_raw("Hello", None, None, None).unwrap();

        let err = provider.synthesize(&request).await.unwrap_err();

        assert!(matches!(err, SpeechError::ProviderUnavailable { .. }));
    }
}
