//! Types for speech synthesis
//!
//! Provider identities, resolved voices, the provider-native audio and the
//! canonical waveform handed to callers.

use std::fmt;
use std::io::Cursor;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Synthesis providers in fixed priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Flat JSON API with bearer authentication, tried first
    Primary,
    /// Markup (SSML) API with subscription key and region, fallback
    Secondary,
}

impl ProviderKind {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved voice for one provider attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Provider the voice belongs to
    pub provider: ProviderKind,
    /// Provider-specific voice identifier
    pub voice_id: String,
    /// BCP-47 language tag
    pub language_tag: String,
}

/// Audio encodings a provider may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Opus codec in an OGG container
    Opus,
    /// OGG container (Vorbis)
    Ogg,
    /// MP3 format
    Mp3,
    /// WAV format (uncompressed)
    Wav,
    /// FLAC format (lossless)
    Flac,
    /// WebM format
    Webm,
    /// M4A/AAC format
    M4a,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Opus => "audio/opus",
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Webm => "audio/webm",
            Self::M4a => "audio/m4a",
        }
    }

    /// File extension used when staging audio on disk
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Opus => "opus",
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Webm => "webm",
            Self::M4a => "m4a",
        }
    }

    /// Parse audio format from MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Handle compound MIME types like "audio/ogg; codecs=opus"
        let base_mime = mime.split(';').next().unwrap_or(mime).trim();

        match base_mime {
            "audio/opus" => Some(Self::Opus),
            "audio/ogg" => {
                if mime.contains("codecs=opus") {
                    Some(Self::Opus)
                } else {
                    Some(Self::Ogg)
                }
            },
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            "audio/webm" => Some(Self::Webm),
            "audio/m4a" | "audio/mp4" | "audio/aac" | "audio/x-m4a" => Some(Self::M4a),
            _ => None,
        }
    }

    /// Parse a short codec name such as `mp3` or `opus`
    #[must_use]
    pub fn from_codec_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "opus" => Some(Self::Opus),
            "ogg" | "vorbis" => Some(Self::Ogg),
            "mp3" | "mpeg" => Some(Self::Mp3),
            "wav" | "pcm" | "riff" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "webm" => Some(Self::Webm),
            "aac" | "m4a" => Some(Self::M4a),
            _ => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Provider-native encoded audio
///
/// Transient: produced by one provider attempt and consumed by the
/// transcoder.
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    data: Bytes,
    format: AudioFormat,
    provider: ProviderKind,
}

impl EncodedAudio {
    /// Create encoded audio
    #[must_use]
    pub fn new(data: impl Into<Bytes>, format: AudioFormat, provider: ProviderKind) -> Self {
        Self {
            data: data.into(),
            format,
            provider,
        }
    }

    /// Raw encoded bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Codec hint
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Provider that produced the audio
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Mono, 16 kHz, signed 16-bit PCM in a WAV container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalWaveform {
    data: Vec<u8>,
    duration_ms: u64,
}

impl CanonicalWaveform {
    /// MIME type of every canonical waveform
    pub const MIME_TYPE: &'static str = "audio/wav";
    /// Sample rate in Hz
    pub const SAMPLE_RATE: u32 = 16_000;
    /// Channel count
    pub const CHANNELS: u16 = 1;
    /// Bits per sample
    pub const BIT_DEPTH: u16 = 16;

    /// Validate WAV bytes and wrap them as a canonical waveform
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Transcode` if the bytes are not a readable WAV
    /// file with exactly the canonical sample format.
    pub fn from_wav_bytes(data: Vec<u8>) -> Result<Self, SpeechError> {
        let reader = hound::WavReader::new(Cursor::new(data.as_slice()))
            .map_err(|e| SpeechError::Transcode(format!("Unreadable WAV output: {e}")))?;
        let spec = reader.spec();

        if spec.sample_rate != Self::SAMPLE_RATE
            || spec.channels != Self::CHANNELS
            || spec.bits_per_sample != Self::BIT_DEPTH
            || spec.sample_format != hound::SampleFormat::Int
        {
            return Err(SpeechError::Transcode(format!(
                "Unexpected WAV format: {} Hz, {} channel(s), {} bit",
                spec.sample_rate, spec.channels, spec.bits_per_sample
            )));
        }

        let duration_ms = u64::from(reader.duration()) * 1000 / u64::from(Self::SAMPLE_RATE);
        drop(reader);

        Ok(Self { data, duration_ms })
    }

    /// WAV bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the WAV bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Duration in milliseconds
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// MIME type (`audio/wav`)
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        Self::SAMPLE_RATE
    }

    /// Channel count
    #[must_use]
    pub const fn channels(&self) -> u16 {
        Self::CHANNELS
    }

    /// Bits per sample
    #[must_use]
    pub const fn bit_depth(&self) -> u16 {
        Self::BIT_DEPTH
    }

    /// Size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
