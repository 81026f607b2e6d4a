//! AI Speech - accent-aware text-to-speech pipeline
//!
//! Turns text into a canonical waveform (mono, 16 kHz, 16-bit PCM WAV):
//! - `VoiceSelector` - accent to provider voice and language tag
//! - `RequestBuilder` - provider-specific payloads (flat JSON or SSML)
//! - `OpenAiTtsProvider` / `AzureTtsProvider` - the two remote providers
//! - `SynthesisOrchestrator` - fixed-order primary/secondary fallback
//! - `FfmpegTranscoder` - external transcoding with scoped temp files
//! - `SynthesisService` - the façade composing all of the above
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` and `transcoder` contain concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{SynthesisConfig, SynthesisService};
//!
//! let service = SynthesisService::from_config(&config)?;
//! let waveform = service.synthesize("Hello", Some("en_br"), Some(1.1), None).await?;
//! assert_eq!(waveform.mime_type(), "audio/wav");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod payload;
pub mod ports;
pub mod providers;
pub mod service;
pub mod transcoder;
pub mod types;
pub mod voices;

pub use cache::synthesis_cache_key;
pub use config::{PrimaryProviderConfig, SecondaryProviderConfig, SynthesisConfig, TranscoderConfig};
pub use error::{ErrorKind, SpeechError};
pub use orchestrator::SynthesisOrchestrator;
pub use payload::{FlatSpeechRequest, ProviderPayload, RequestBuilder};
pub use ports::{AudioTranscoder, SpeechSynthesizer, SynthesisCache};
pub use providers::{AzureTtsProvider, OpenAiTtsProvider};
pub use service::{Readiness, SynthesisService};
pub use transcoder::FfmpegTranscoder;
pub use types::{AudioFormat, CanonicalWaveform, EncodedAudio, ProviderKind, VoiceProfile};
pub use voices::VoiceSelector;
