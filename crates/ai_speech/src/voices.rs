//! Voice selection
//!
//! Maps an accent to a concrete provider voice and language tag. The static
//! table below is the only place new accents or voices are registered.

use domain::Accent;

use crate::types::{ProviderKind, VoiceProfile};

/// Default voice per provider and accent bucket
const VOICE_TABLE: &[(ProviderKind, Accent, &str)] = &[
    (ProviderKind::Primary, Accent::Us, "nova"),
    (ProviderKind::Primary, Accent::Gb, "fable"),
    (ProviderKind::Secondary, Accent::Us, "en-US-JennyNeural"),
    (ProviderKind::Secondary, Accent::Gb, "en-GB-SoniaNeural"),
];

/// Fallback when the table has no row for a combination
const FALLBACK_VOICE: &str = "nova";

/// Pure accent-to-voice resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceSelector;

impl VoiceSelector {
    /// Resolve the voice for one provider attempt
    ///
    /// A non-blank `voice_override` is used verbatim; it is not checked
    /// against any known-voice list, so a bad value surfaces as a provider
    /// failure. The language tag always follows the accent.
    #[must_use]
    pub fn select(
        provider: ProviderKind,
        accent: Accent,
        voice_override: Option<&str>,
    ) -> VoiceProfile {
        let voice_id = voice_override
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Self::default_voice(provider, accent));

        VoiceProfile {
            provider,
            voice_id: voice_id.to_string(),
            language_tag: accent.language_tag().to_string(),
        }
    }

    /// Default voice id for a provider and accent
    #[must_use]
    pub fn default_voice(provider: ProviderKind, accent: Accent) -> &'static str {
        VOICE_TABLE
            .iter()
            .find(|(p, a, _)| *p == provider && *a == accent)
            .map_or(FALLBACK_VOICE, |(_, _, voice)| *voice)
    }
}
