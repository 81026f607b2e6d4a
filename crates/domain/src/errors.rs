//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Text to synthesize is empty after trimming
    #[error("Text must not be empty")]
    EmptyText,
}
