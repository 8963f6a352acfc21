//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URI is invalid or malformed.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// The URI cannot carry path segments (e.g. `mailto:` or `data:`).
    #[error("URI cannot be a base: {0}")]
    CannotBeABase(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A `Set-Cookie` or `Cookie` string could not be parsed.
    #[error("invalid cookie: {0}")]
    InvalidCookie(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
