//! Accent value object

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// English accent used to pick a voice and a language tag
///
/// Parsing is lenient: anything that is not recognisably British English
/// resolves to [`Accent::Us`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Accent {
    /// General American English (`en_us`)
    #[default]
    #[serde(rename = "en_us")]
    Us,
    /// British English (`en_br`)
    #[serde(rename = "en_br")]
    Gb,
}

impl Accent {
    /// Normalize a raw accent identifier into one of the two buckets
    ///
    /// Accepts the canonical bucket names as well as BCP-47 tags and common
    /// short forms, case-insensitively and with `-` or `_` separators.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "en_br" | "en_gb" | "en_uk" | "gb" | "uk" | "br" | "british" => Self::Gb,
            _ => Self::Us,
        }
    }

    /// Resolve an optional raw identifier, defaulting when absent
    #[must_use]
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::default, Self::parse_lenient)
    }

    /// Bucket identifier used as the key of voice tables
    #[must_use]
    pub const fn bucket(&self) -> &'static str {
        match self {
            Self::Us => "en_us",
            Self::Gb => "en_br",
        }
    }

    /// BCP-47 language tag
    #[must_use]
    pub const fn language_tag(&self) -> &'static str {
        match self {
            Self::Us => "en-US",
            Self::Gb => "en-GB",
        }
    }

    /// All supported accents
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Us, Self::Gb]
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bucket())
    }
}

impl From<&str> for Accent {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl<'de> Deserialize<'de> for Accent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}
