//! Port definitions for speech synthesis
//!
//! Defines the traits (ports) that providers, the transcoder and cache
//! backends must implement.

use std::time::Duration;

use async_trait::async_trait;
use domain::SynthesisRequest;
#[cfg(test)]
use mockall::automock;

use crate::error::SpeechError;
use crate::types::{CanonicalWaveform, EncodedAudio, ProviderKind};

/// Port for a remote text-to-speech provider
///
/// Implementations resolve the voice and build the provider payload
/// themselves and return the audio exactly as the provider encoded it.
///
/// # Example
///
/// ```ignore
/// use ai_speech::SpeechSynthesizer;
///
/// async fn speak(
///     provider: &dyn SpeechSynthesizer,
///     request: &SynthesisRequest,
/// ) -> Result<usize, SpeechError> {
///     let audio = provider.synthesize(request).await?;
///     Ok(audio.size_bytes())
/// }
/// ```
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Which provider slot this implementation fills
    fn kind(&self) -> ProviderKind;

    /// Whether the credentials needed to call the provider are present
    fn is_configured(&self) -> bool;

    /// Synthesize the request into provider-native audio
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::ProviderUnavailable` without any network call
    /// when credentials are missing, otherwise a provider failure for
    /// timeouts, transport errors, non-success statuses or empty bodies.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<EncodedAudio, SpeechError>;
}

/// Port for converting provider audio into the canonical waveform
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Transcode encoded audio to mono 16 kHz 16-bit PCM WAV
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Transcode` if the transcoder cannot be started,
    /// exits unsuccessfully, times out or produces unusable output.
    async fn transcode(&self, audio: &EncodedAudio) -> Result<CanonicalWaveform, SpeechError>;

    /// Check whether the transcoder binary can be executed
    async fn is_available(&self) -> bool;
}

/// Port for caching synthesized waveforms
///
/// Values are stored as raw WAV bytes keyed by `synthesis_cache_key`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SynthesisCache: Send + Sync + std::fmt::Debug {
    /// Get cached bytes by key
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SpeechError>;

    /// Store bytes with a time-to-live
    async fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Duration)
    -> Result<(), SpeechError>;

    /// Remove a single entry
    async fn invalidate(&self, key: &str) -> Result<(), SpeechError>;
}

#[cfg(test)]
mod tests {
    use domain::SynthesisRequest;

    use super::*;
    use crate::types::AudioFormat;

    fn _assert_object_safe(_: &dyn SpeechSynthesizer, _: &dyn AudioTranscoder) {}

    #[test]
    fn traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SpeechSynthesizer>();
        assert_send_sync::<dyn AudioTranscoder>();
        assert_send_sync::<dyn SynthesisCache>();
    }

    #[tokio::test]
    async fn mock_synthesizer_returns_audio() {
        let mut mock = MockSpeechSynthesizer::new();
        mock.expect_kind().return_const(ProviderKind::Primary);
        mock.expect_synthesize().returning(|_| {
            Ok(EncodedAudio::new(
                vec![0xFF, 0xFB],
                AudioFormat::Mp3,
                ProviderKind::Primary,
            ))
        });

        let request = SynthesisRequest::from_raw("Hello", None, None, None).unwrap();
        let audio = mock.synthesize(&request).await.unwrap();

        assert_eq!(mock.kind(), ProviderKind::Primary);
        assert_eq!(audio.format(), AudioFormat::Mp3);
    }
}
