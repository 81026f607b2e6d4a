//! Provider request payloads
//!
//! The two providers disagree on both input shape and rate semantics: the
//! primary takes a flat JSON object with a speed multiplier, the secondary
//! takes an SSML document with a signed percentage. `RequestBuilder` is the
//! only place that turns one `SpeechRate` into either form.

use domain::{SpeechRate, SynthesisText};
use serde::Serialize;

use crate::config::SynthesisConfig;
use crate::error::SpeechError;
use crate::types::{ProviderKind, VoiceProfile};

/// Flat request body for the primary provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatSpeechRequest {
    /// Model identifier
    pub model: String,
    /// Raw text, unescaped
    pub input: String,
    /// Voice identifier
    pub voice: String,
    /// Speed multiplier
    pub speed: f64,
    /// Requested encoding
    pub response_format: String,
}

/// Provider-ready request body
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderPayload {
    /// JSON body for the primary provider
    Json(FlatSpeechRequest),
    /// SSML document for the secondary provider
    Ssml(String),
}

impl ProviderPayload {
    /// Content-Type header for this payload
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Ssml(_) => "application/ssml+xml",
        }
    }

    /// Encode the payload as an HTTP request body
    pub fn into_body(self) -> Result<Vec<u8>, SpeechError> {
        match self {
            Self::Json(request) => serde_json::to_vec(&request).map_err(|e| {
                SpeechError::Configuration(format!("Failed to encode request body: {e}"))
            }),
            Self::Ssml(ssml) => Ok(ssml.into_bytes()),
        }
    }
}

/// Renders synthesis payloads for either provider
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    response_format: String,
    style: String,
}

impl RequestBuilder {
    /// Create a builder
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        response_format: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            response_format: response_format.into(),
            style: style.into(),
        }
    }

    /// Create a builder from the pipeline configuration
    #[must_use]
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(
            config.primary.model.clone(),
            config.primary.response_format.clone(),
            config.secondary.style.clone(),
        )
    }

    /// Build the payload for `provider`
    #[must_use]
    pub fn build(
        &self,
        provider: ProviderKind,
        text: &SynthesisText,
        voice: &VoiceProfile,
        rate: SpeechRate,
    ) -> ProviderPayload {
        match provider {
            ProviderKind::Primary => ProviderPayload::Json(FlatSpeechRequest {
                model: self.model.clone(),
                input: text.as_str().to_string(),
                voice: voice.voice_id.clone(),
                speed: rate.multiplier(),
                response_format: self.response_format.clone(),
            }),
            ProviderKind::Secondary => ProviderPayload::Ssml(self.ssml(text, voice, rate)),
        }
    }

    fn ssml(&self, text: &SynthesisText, voice: &VoiceProfile, rate: SpeechRate) -> String {
        format!(
            concat!(
                r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" "#,
                r#"xmlns:mstts="https://www.w3.org/2001/mstts" xml:lang="{lang}">"#,
                r#"<voice name="{voice}">"#,
                r#"<mstts:express-as style="{style}">"#,
                r#"<prosody rate="{rate}">{text}</prosody>"#,
                "</mstts:express-as></voice></speak>"
            ),
            lang = escape_markup(&voice.language_tag),
            voice = escape_markup(&voice.voice_id),
            style = escape_markup(&self.style),
            rate = format_rate_delta(rate),
            text = escape_markup(text.as_str()),
        )
    }
}

/// Signed percentage such as `+8%`, `-10%` or `+0%`
#[must_use]
pub fn format_rate_delta(rate: SpeechRate) -> String {
    format!("{:+}%", rate.percent_delta())
}

/// Escape `&`, `<`, `>` and `"` for embedding in SSML
#[must_use]
pub fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
