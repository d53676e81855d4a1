//! Domain error types
//!
//! Validation failures for the domain value types. Engine-level errors
//! (sync failures) live in `fontvault-sync`.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid path format or content
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Invalid content digest (expected 64 lowercase hex characters)
    #[error("Invalid content digest: {0}")]
    InvalidDigest(String),

    /// Invalid font family name
    #[error("Invalid family name: {0}")]
    InvalidFamilyName(String),

    /// Path escapes or lies outside the expected root
    #[error("Path outside root: {0}")]
    PathOutsideRoot(String),

    /// Unknown font format name
    #[error("Unknown font format: {0}")]
    UnknownFormat(String),
}
