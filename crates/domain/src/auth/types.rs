//! Credential and authentication error types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Credentials stored by `login` and handed to the auth strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Username and password pair
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// Pre-issued bearer token
    Bearer {
        /// The token, without the `Bearer ` prefix
        token: String,
    },
    /// Anything else a custom strategy understands
    Custom(Value),
}

impl Credentials {
    /// Creates basic credentials.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates bearer credentials.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns a short label for logs that never includes the secret.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::Custom(_) => "custom",
        }
    }
}

impl From<Value> for Credentials {
    fn from(value: Value) -> Self {
        Self::Custom(value)
    }
}

/// Errors raised by an auth strategy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The strategy does not understand this kind of credentials.
    #[error("unsupported credentials for this strategy: {kind}")]
    UnsupportedCredentials {
        /// Kind of the credentials that were supplied.
        kind: String,
    },

    /// The remote side refused the credentials.
    #[error("authentication rejected: {message}")]
    Rejected {
        /// Error description.
        message: String,
    },

    /// The strategy could not reach the authentication endpoint.
    #[error("network error during authentication: {message}")]
    NetworkError {
        /// Error description.
        message: String,
    },
}
