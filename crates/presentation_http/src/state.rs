//! Application state shared across handlers

use std::sync::Arc;

use ai_speech::SynthesisService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Text-to-waveform pipeline
    pub synthesis: Arc<SynthesisService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
