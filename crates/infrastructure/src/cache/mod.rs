//! Cache implementations
//!
//! Provides the in-memory adapter for `ai_speech::SynthesisCache`:
//! - `MokaSynthesisCache`: size-bounded waveform cache with per-entry TTL

mod moka_cache;

pub use moka_cache::{MokaCacheConfig, MokaSynthesisCache};
