//! Speaking-rate value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaking-rate multiplier (1.0 = natural speed)
///
/// Construction never fails. Missing, non-finite or non-positive values fall
/// back to [`SpeechRate::DEFAULT`]; any other value is kept as given and left
/// for the provider to accept or reject.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SpeechRate(f64);

impl SpeechRate {
    /// Natural speaking rate
    pub const DEFAULT: Self = Self(1.0);

    /// Sanitize a raw multiplier
    #[must_use]
    pub fn new(raw: f64) -> Self {
        if raw.is_finite() && raw > 0.0 {
            Self(raw)
        } else {
            Self::DEFAULT
        }
    }

    /// Sanitize an optional multiplier, defaulting when absent
    #[must_use]
    pub fn from_optional(raw: Option<f64>) -> Self {
        raw.map_or(Self::DEFAULT, Self::new)
    }

    /// Multiplier value
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.0
    }

    /// Signed percentage delta from natural speed, `round((rate - 1) * 100)`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent_delta(&self) -> i32 {
        // Float-to-int casts saturate at the i32 bounds.
        ((self.0 - 1.0) * 100.0).round() as i32
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for SpeechRate {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<SpeechRate> for f64 {
    fn from(rate: SpeechRate) -> Self {
        rate.0
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
