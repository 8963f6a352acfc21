//! Application error types

use std::fmt;

use thiserror::Error;
use vouch_domain::{AuthError, DomainError, ExecutionResult, ExpectationErrors};

use crate::ports::HttpClientError;

/// Problems with how a test was put together.
///
/// These are fatal for the execution that surfaces them and are never
/// retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Credentials were stored but no strategy knows how to use them.
    #[error("cannot log in without an auth strategy")]
    MissingAuthStrategy,

    /// An expectation was registered without a method name.
    #[error("an expectation needs a method name and a check factory")]
    MissingExpectationName,

    /// An expectation with this method name already exists.
    #[error("an expectation named `{0}` is already registered")]
    DuplicateExpectation(String),

    /// No expectation is registered under this method name.
    #[error("no expectation named `{0}` is registered")]
    UnknownExpectation(String),

    /// A check factory rejected the arguments it was called with.
    #[error("invalid arguments for `{method}`: {message}")]
    InvalidArguments {
        /// Method name of the expectation.
        method: String,
        /// What was wrong with the arguments.
        message: String,
    },

    /// The request URI could not be resolved.
    #[error("invalid request URI: {0}")]
    InvalidUri(#[from] DomainError),
}

/// Every failed expectation of one execution, together with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedError {
    result: ExecutionResult,
}

impl CombinedError {
    /// Wrap a result whose `errors` map is not empty.
    #[must_use]
    pub const fn new(result: ExecutionResult) -> Self {
        Self { result }
    }

    /// The failed expectations, keyed by display label.
    #[must_use]
    pub const fn errors(&self) -> &ExpectationErrors {
        &self.result.errors
    }

    /// The full result of the execution.
    #[must_use]
    pub const fn result(&self) -> &ExecutionResult {
        &self.result
    }

    /// Consume the error and return the result.
    #[must_use]
    pub fn into_result(self) -> ExecutionResult {
        self.result
    }
}

impl fmt::Display for CombinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.result.errors.len();
        write!(
            f,
            "{count} expectation{} failed (status {})",
            if count == 1 { "" } else { "s" },
            self.result.status
        )?;
        for (label, failure) in &self.result.errors {
            write!(f, "\n  {label}: {}", failure.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for CombinedError {}

/// Why an execution did not produce a passing result.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The test was misconfigured; nothing was sent.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The auth strategy failed; nothing was sent.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The HTTP round trip failed; no expectation ran.
    #[error(transparent)]
    Transport(#[from] HttpClientError),

    /// The request completed but at least one expectation failed.
    #[error(transparent)]
    Expectations(#[from] CombinedError),
}

impl ExecuteError {
    /// Returns the combined expectation failure, if that is what this is.
    #[must_use]
    pub const fn as_combined(&self) -> Option<&CombinedError> {
        match self {
            Self::Expectations(combined) => Some(combined),
            _ => None,
        }
    }
}

/// Result type of one execution.
pub type ExecuteResult = Result<ExecutionResult, ExecuteError>;
