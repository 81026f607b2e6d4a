//! Value Objects - Immutable, identity-less domain primitives

mod accent;
mod speech_rate;
mod synthesis_text;

pub use accent::Accent;
pub use speech_rate::SpeechRate;
pub use synthesis_text::SynthesisText;
