//! Speech synthesis errors

use domain::DomainError;
use thiserror::Error;

use crate::types::ProviderKind;

/// Coarse error classes surfaced to callers of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was rejected before any provider was attempted
    InvalidInput,
    /// A provider had no credentials configured
    ProviderUnavailable,
    /// A provider was reachable but failed
    ProviderError,
    /// Every provider failed
    AllProvidersFailed,
    /// The external transcoder failed
    Transcode,
    /// Local misconfiguration or cache failure
    Internal,
}

/// Errors that can occur during speech synthesis
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Invalid caller input (empty text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider credentials are missing
    #[error("{provider} provider not available: {reason}")]
    ProviderUnavailable {
        /// Provider that was skipped
        provider: ProviderKind,
        /// Which credential is missing
        reason: String,
    },

    /// Provider answered with a non-success status
    #[error("{provider} provider returned HTTP {status}: {body}")]
    ProviderError {
        /// Provider that failed
        provider: ProviderKind,
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Provider answered with success but the payload is unusable
    #[error("{provider} provider returned an invalid response: {detail}")]
    InvalidResponse {
        /// Provider that failed
        provider: ProviderKind,
        /// What was wrong with the response
        detail: String,
    },

    /// Provider call exceeded its timeout
    #[error("{provider} provider timed out after {timeout_ms}ms")]
    Timeout {
        /// Provider that timed out
        provider: ProviderKind,
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Provider could not be reached
    #[error("{provider} provider request failed: {detail}")]
    RequestFailed {
        /// Provider that failed
        provider: ProviderKind,
        /// Transport error description
        detail: String,
    },

    /// Both providers failed
    #[error("No TTS provider available (primary: {primary}; secondary: {secondary})")]
    AllProvidersFailed {
        /// Primary failure message
        primary: String,
        /// Secondary failure message
        secondary: String,
    },

    /// External transcoding failed
    #[error("Transcoding failed: {0}")]
    Transcode(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cache backend failure
    #[error("Cache error: {0}")]
    Cache(String),
}

/// Longest provider error body kept in an error message
const MAX_BODY_LEN: usize = 512;

impl SpeechError {
    /// Build a `ProviderError`, truncating long bodies
    pub fn provider_status(provider: ProviderKind, status: u16, body: &str) -> Self {
        let body = if body.chars().count() > MAX_BODY_LEN {
            let truncated: String = body.chars().take(MAX_BODY_LEN).collect();
            format!("{truncated}…")
        } else {
            body.to_string()
        };
        Self::ProviderError {
            provider,
            status,
            body,
        }
    }

    /// Map a transport error from `reqwest` into a provider failure
    pub fn transport(provider: ProviderKind, timeout_ms: u64, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider,
                timeout_ms,
            }
        } else {
            Self::RequestFailed {
                provider,
                detail: err.to_string(),
            }
        }
    }

    /// Coarse class of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::ProviderUnavailable { .. } => ErrorKind::ProviderUnavailable,
            Self::ProviderError { .. }
            | Self::InvalidResponse { .. }
            | Self::Timeout { .. }
            | Self::RequestFailed { .. } => ErrorKind::ProviderError,
            Self::AllProvidersFailed { .. } => ErrorKind::AllProvidersFailed,
            Self::Transcode(_) => ErrorKind::Transcode,
            Self::Configuration(_) | Self::Cache(_) => ErrorKind::Internal,
        }
    }
}

impl From<DomainError> for SpeechError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_error_message() {
        let err = SpeechError::InvalidInput("Text must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: Text must not be empty");
    }

    #[test]
    fn provider_unavailable_error_message() {
        let err = SpeechError::ProviderUnavailable {
            provider: ProviderKind::Secondary,
            reason: "region not configured".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "secondary provider not available: region not configured"
        );
    }

    #[test]
    fn provider_error_message() {
        let err = SpeechError::provider_status(ProviderKind::Primary, 401, "bad key");
        assert_eq!(err.to_string(), "primary provider returned HTTP 401: bad key");
    }

    #[test]
    fn provider_error_truncates_long_body() {
        let body = "x".repeat(2000);
        let SpeechError::ProviderError { body, .. } =
            SpeechError::provider_status(ProviderKind::Primary, 500, &body)
        else {
            unreachable!("Expected ProviderError");
        };
        assert_eq!(body.chars().count(), MAX_BODY_LEN + 1);
    }

    #[test]
    fn timeout_error_message() {
        let err = SpeechError::Timeout {
            provider: ProviderKind::Primary,
            timeout_ms: 15000,
        };
        assert_eq!(err.to_string(), "primary provider timed out after 15000ms");
    }

    #[test]
    fn all_providers_failed_names_both() {
        let err = SpeechError::AllProvidersFailed {
            primary: "a".to_string(),
            secondary: "b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("No TTS provider available"));
        assert!(msg.contains("primary: a"));
        assert!(msg.contains("secondary: b"));
    }

    #[test]
    fn transcode_error_message() {
        let err = SpeechError::Transcode("ffmpeg exited with 1".to_string());
        assert_eq!(err.to_string(), "Transcoding failed: ffmpeg exited with 1");
    }

    #[test]
    fn provider_failures_are_classified() {
        let unavailable = SpeechError::ProviderUnavailable {
            provider: ProviderKind::Primary,
            reason: "no key".to_string(),
        };
        let status = SpeechError::provider_status(ProviderKind::Primary, 500, "");
        let timeout = SpeechError::Timeout {
            provider: ProviderKind::Primary,
            timeout_ms: 1,
        };

        assert_eq!(unavailable.kind(), ErrorKind::ProviderUnavailable);
        assert_eq!(status.kind(), ErrorKind::ProviderError);
        assert_eq!(timeout.kind(), ErrorKind::ProviderError);
        assert_eq!(SpeechError::Transcode(String::new()).kind(), ErrorKind::Transcode);
    }

    #[test]
    fn domain_error_becomes_invalid_input() {
        let err: SpeechError = DomainError::EmptyText.into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
