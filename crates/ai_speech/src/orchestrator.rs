//! Provider fallback
//!
//! Tries the primary provider, then the secondary one, strictly in that
//! order and one at a time.
//!
//! ```text
//! SynthesisRequest
//!     │
//!     ▼
//! ┌─────────┐  any failure  ┌───────────┐  failure  ┌────────────────────┐
//! │ Primary │──────────────▶│ Secondary │──────────▶│ AllProvidersFailed │
//! └─────────┘               └───────────┘           └────────────────────┘
//!     │ ok                        │ ok
//!     ▼                           ▼
//!              EncodedAudio
//! ```

use std::sync::Arc;

use domain::SynthesisRequest;
use tracing::{debug, info, instrument, warn};

use crate::error::{ErrorKind, SpeechError};
use crate::ports::SpeechSynthesizer;
use crate::types::EncodedAudio;

/// Fixed-order primary/secondary fallback
#[derive(Clone)]
pub struct SynthesisOrchestrator {
    primary: Arc<dyn SpeechSynthesizer>,
    secondary: Arc<dyn SpeechSynthesizer>,
}

impl std::fmt::Debug for SynthesisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisOrchestrator")
            .field("primary", &self.primary.kind())
            .field("primary_configured", &self.primary.is_configured())
            .field("secondary", &self.secondary.kind())
            .field("secondary_configured", &self.secondary.is_configured())
            .finish()
    }
}

impl SynthesisOrchestrator {
    /// Create an orchestrator over two providers
    pub fn new(primary: Arc<dyn SpeechSynthesizer>, secondary: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { primary, secondary }
    }

    /// Providers in attempt order
    pub fn providers(&self) -> [&dyn SpeechSynthesizer; 2] {
        [self.primary.as_ref(), self.secondary.as_ref()]
    }

    /// Synthesize with the first provider that succeeds
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AllProvidersFailed` carrying both failure
    /// messages when neither provider produced audio.
    #[instrument(skip(self, request), fields(text_len = request.text.char_count(), accent = %request.accent))]
    pub async fn orchestrate(&self, request: &SynthesisRequest) -> Result<EncodedAudio, SpeechError> {
        let primary_error = match self.primary.synthesize(request).await {
            Ok(audio) => return Ok(audio),
            Err(e) => {
                log_failure(&e);
                e
            },
        };

        match self.secondary.synthesize(request).await {
            Ok(audio) => {
                info!(provider = %self.secondary.kind(), "Synthesis succeeded (fallback)");
                Ok(audio)
            },
            Err(secondary_error) => {
                log_failure(&secondary_error);
                Err(SpeechError::AllProvidersFailed {
                    primary: primary_error.to_string(),
                    secondary: secondary_error.to_string(),
                })
            },
        }
    }
}

fn log_failure(err: &SpeechError) {
    if err.kind() == ErrorKind::ProviderUnavailable {
        debug!("Skipping provider: {err}");
    } else {
        warn!("Provider failed: {err}");
    }
}
