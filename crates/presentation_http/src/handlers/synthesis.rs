//! Speech synthesis handlers

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Synthesis parameters, from a query string or a JSON body
#[derive(Debug, Default, Deserialize)]
pub struct SynthesisParams {
    /// Text to speak (required, must not be blank)
    #[serde(default)]
    pub text: Option<String>,
    /// Accent code such as `en_us` or `en_br`
    #[serde(default)]
    pub accent: Option<String>,
    /// Speed multiplier; unparseable values fall back to the default
    #[serde(default, deserialize_with = "lenient_rate")]
    pub rate: Option<f64>,
    /// Provider voice id overriding the accent's default
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRate {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept a number or a numeric string; anything else becomes `None`
fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawRate::deserialize(deserializer)? {
        RawRate::Number(rate) => Some(rate),
        RawRate::Text(raw) => raw.trim().parse().ok(),
        RawRate::Other(_) => None,
    })
}

/// `GET /synthesize-speech?text=..&accent=..&rate=..&voice=..`
pub async fn synthesize_query(
    State(state): State<AppState>,
    params: Result<Query<SynthesisParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    synthesize(&state, params).await
}

/// `POST /synthesize-speech` with a JSON body
pub async fn synthesize_json(
    State(state): State<AppState>,
    params: Result<Json<SynthesisParams>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(params) = params?;
    synthesize(&state, params).await
}

#[instrument(skip(state, params), fields(
    text_len = params.text.as_deref().map_or(0, str::len),
    accent = params.accent.as_deref().unwrap_or_default()
))]
async fn synthesize(state: &AppState, params: SynthesisParams) -> Result<Response, ApiError> {
    let waveform = state
        .synthesis
        .synthesize(
            params.text.as_deref().unwrap_or_default(),
            params.accent.as_deref(),
            params.rate,
            params.voice.as_deref(),
        )
        .await?;

    info!(
        duration_ms = waveform.duration_ms(),
        size = waveform.size_bytes(),
        "Synthesized speech"
    );

    Ok((
        [
            (header::CONTENT_TYPE, waveform.mime_type()),
            (header::CACHE_CONTROL, "no-store"),
        ],
        waveform.into_data(),
    )
        .into_response())
}
