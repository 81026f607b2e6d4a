//! Speech synthesis provider implementations
//!
//! Contains the two concrete implementations of the `SpeechSynthesizer` port.
//! Neither retries internally; fallback belongs to the orchestrator.

pub mod azure;
pub mod openai;

pub use azure::AzureTtsProvider;
pub use openai::OpenAiTtsProvider;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::debug;

use crate::error::SpeechError;
use crate::types::{AudioFormat, EncodedAudio, ProviderKind};

/// Most bytes read from a non-success response body
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Build an HTTP client with a whole-request timeout
fn http_client(timeout_ms: u64) -> Result<Client, SpeechError> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| SpeechError::Configuration(format!("Failed to create HTTP client: {e}")))
}

/// Turn a provider response into encoded audio
///
/// The codec comes from the response Content-Type when it names an audio
/// type, otherwise from `requested`.
async fn read_audio_response(
    provider: ProviderKind,
    response: Response,
    requested: AudioFormat,
    timeout_ms: u64,
    error_message: fn(&str) -> String,
) -> Result<EncodedAudio, SpeechError> {
    let status = response.status();
    if !status.is_success() {
        let body = read_error_body(response).await;
        return Err(SpeechError::provider_status(
            provider,
            status.as_u16(),
            &error_message(&body),
        ));
    }

    let format = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(AudioFormat::from_mime_type)
        .unwrap_or(requested);

    let data = response
        .bytes()
        .await
        .map_err(|e| SpeechError::transport(provider, timeout_ms, &e))?;

    if data.is_empty() {
        return Err(SpeechError::InvalidResponse {
            provider,
            detail: "empty audio body".to_string(),
        });
    }

    debug!(
        provider = %provider,
        audio_size = data.len(),
        format = %format,
        "Provider returned audio"
    );

    Ok(EncodedAudio::new(data, format, provider))
}

/// Read at most `MAX_ERROR_BODY_BYTES` of an error body, lossily decoded
async fn read_error_body(mut response: Response) -> String {
    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) | Err(_) => break,
        }
    }
    body.truncate(MAX_ERROR_BODY_BYTES);
    String::from_utf8_lossy(&body).into_owned()
}
