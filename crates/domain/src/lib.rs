//! Domain layer for the TTS gateway
//!
//! Contains the request entity, the value objects it is built from, and
//! domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::SynthesisRequest;
pub use errors::DomainError;
pub use value_objects::{Accent, SpeechRate, SynthesisText};
