//! Cache key generation for synthesized audio

use domain::SynthesisRequest;

/// Prefix shared by every synthesis cache key
pub const CACHE_KEY_PREFIX: &str = "tts";

/// Generate a cache key from components using blake3
///
/// Components are length-prefixed, so their contents may contain any byte.
#[must_use]
pub fn generate_cache_key(prefix: &str, components: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for component in components {
        hasher.update(&(component.len() as u64).to_le_bytes());
        hasher.update(component.as_bytes());
    }
    format!("{prefix}:{}", hasher.finalize().to_hex())
}

/// Cache key for a normalized synthesis request
///
/// Covers text, accent bucket, rate and voice override, so two requests share
/// a key only when they would produce the same provider call.
#[must_use]
pub fn synthesis_cache_key(request: &SynthesisRequest) -> String {
    // Quantize to avoid floating point noise
    let rate = format!("{:.2}", request.rate.multiplier());
    generate_cache_key(
        CACHE_KEY_PREFIX,
        &[
            request.text.as_str(),
            request.accent.bucket(),
            &rate,
            request.voice_override().unwrap_or_default(),
        ],
    )
}
