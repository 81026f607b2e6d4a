//! Synthesis request entity

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Accent, SpeechRate, SynthesisText};

/// A single, normalized request to turn text into speech
///
/// Created per call and never persisted. Only the text can make
/// construction fail; every other field is sanitized to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Text to speak
    pub text: SynthesisText,
    /// Accent bucket
    #[serde(default)]
    pub accent: Accent,
    /// Speaking-rate multiplier
    #[serde(default)]
    pub rate: SpeechRate,
    /// Provider voice id used verbatim instead of the accent default
    #[serde(default)]
    pub voice_override: Option<String>,
}

impl SynthesisRequest {
    /// Create a request from already-validated parts
    #[must_use]
    pub const fn new(text: SynthesisText, accent: Accent, rate: SpeechRate) -> Self {
        Self {
            text,
            accent,
            rate,
            voice_override: None,
        }
    }

    /// Build a request from raw caller input
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyText` if `text` is empty or whitespace.
    pub fn from_raw(
        text: &str,
        accent: Option<&str>,
        rate: Option<f64>,
        voice_override: Option<&str>,
    ) -> Result<Self, DomainError> {
        let text = SynthesisText::new(text)?;
        Ok(Self::new(text, Accent::from_optional(accent), SpeechRate::from_optional(rate))
            .with_voice_override(voice_override))
    }

    /// Set the voice override; blank values are ignored
    #[must_use]
    pub fn with_voice_override(mut self, voice: Option<&str>) -> Self {
        self.voice_override = voice
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string);
        self
    }

    /// Voice override, if any
    #[must_use]
    pub fn voice_override(&self) -> Option<&str> {
        self.voice_override.as_deref()
    }
}
