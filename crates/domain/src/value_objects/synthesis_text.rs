//! Text to be spoken

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Trimmed, non-empty text to synthesize
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SynthesisText(String);

impl SynthesisText {
    /// Create synthesis text, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyText` if nothing is left after trimming.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyText);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The text as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl TryFrom<String> for SynthesisText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SynthesisText> for String {
    fn from(text: SynthesisText) -> Self {
        text.0
    }
}

impl AsRef<str> for SynthesisText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SynthesisText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
