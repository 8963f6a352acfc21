//! Expectation outcomes.
//!
//! A check reports a mismatch as an [`ExpectationFailure`]; the executor
//! collects those under their display labels into an [`ExecutionResult`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cookie::CookieJar;
use crate::request::{Body, Header};
use crate::response::ResponseSpec;

/// Why a single expectation did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectationFailure {
    /// Human-readable description of the mismatch.
    pub message: String,
    /// What the check wanted, when it can be shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// What the response actually had, when it can be shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ExpectationFailure {
    /// Create a failure with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Create a failure that records both sides of the comparison.
    #[must_use]
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }
}

impl fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExpectationFailure {}

/// Failed expectations keyed by display label, in registration order.
pub type ExpectationErrors = IndexMap<String, ExpectationFailure>;

/// Outcome of one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Failed expectations; empty on success.
    pub errors: ExpectationErrors,
    /// Response status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<Header>,
    /// The test's cookie jar after the response cookies were merged.
    pub cookies: CookieJar,
    /// Response body.
    pub body: Body,
}

impl ExecutionResult {
    /// Build a result from the response and the jar state after merging.
    #[must_use]
    pub fn new(errors: ExpectationErrors, response: ResponseSpec, cookies: CookieJar) -> Self {
        Self {
            errors,
            status: response.status,
            headers: response.headers,
            cookies,
            body: response.body,
        }
    }

    /// Check if every expectation held.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Labels of the failed expectations, in order.
    pub fn failed_labels(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}
