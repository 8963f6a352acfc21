//! Execute Request
//!
//! Drives one request/assert cycle for an [`ApiTest`]: surface configuration
//! problems, run the auth strategy, send exactly one request, merge response
//! cookies into the jar, then evaluate every expectation and aggregate the
//! failures.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;
use vouch_domain::{
    Body, DomainError, ExecutionResult, ExpectationErrors, Headers, HttpMethod, ResponseSpec,
};

use crate::api_test::ApiTest;
use crate::error::{CombinedError, ConfigurationError, ExecuteError, ExecuteResult};
use crate::ports::TransportRequest;

/// Per-execution values that win over the builder's state.
///
/// Fields left as `None` are filled from the builder. Override headers are
/// layered on top of the builder's headers rather than replacing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    /// HTTP method.
    pub method: Option<HttpMethod>,
    /// Absolute URL, replacing the composed URI.
    pub url: Option<String>,
    /// Request body.
    pub body: Option<Body>,
    /// Extra or replacement headers.
    pub headers: Option<Headers>,
    /// Whether redirects are followed.
    pub follow_redirect: Option<bool>,
    /// Whether JSON mode is on.
    pub json_mode: Option<bool>,
    /// Transport timeout.
    pub timeout: Option<Duration>,
}

impl ApiTest {
    /// Sends the request once and checks every expectation.
    ///
    /// # Errors
    ///
    /// - [`ExecuteError::Configuration`] for a deferred expectation problem,
    ///   credentials without a strategy or an unresolvable URI; nothing is
    ///   sent.
    /// - [`ExecuteError::Auth`] if the strategy fails; nothing is sent.
    /// - [`ExecuteError::Transport`] if the round trip fails; no expectation
    ///   runs.
    /// - [`ExecuteError::Expectations`] if at least one expectation failed.
    pub async fn execute(&mut self) -> ExecuteResult {
        self.execute_with(RequestOverrides::default()).await
    }

    /// Like [`ApiTest::execute`], with per-call overrides.
    ///
    /// # Errors
    ///
    /// See [`ApiTest::execute`].
    pub async fn execute_with(&mut self, overrides: RequestOverrides) -> ExecuteResult {
        if let Some(err) = &self.deferred {
            return Err(err.clone().into());
        }

        self.authenticate().await?;

        let request = self.build_request(overrides)?;
        if self.log {
            debug!(
                method = %request.method,
                url = %request.url,
                cookies = request.cookies.len(),
                "sending request"
            );
        }

        let client = Arc::clone(&self.client);
        let response = client.send(request).await.inspect_err(|err| {
            if self.log {
                warn!(error = %err, "request failed");
            }
        })?;

        for err in self.cookie_jar.store_response_cookies(&response) {
            if self.log {
                warn!(error = %err, "ignoring malformed Set-Cookie header");
            }
        }

        let errors = self.evaluate(&response);
        if self.log {
            info!(
                status = response.status,
                elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                checks = self.expectations.len(),
                failed = errors.len(),
                "response checked"
            );
        }

        let result = ExecutionResult::new(errors, response, self.cookie_jar.clone());
        if result.is_success() {
            Ok(result)
        } else {
            Err(CombinedError::new(result).into())
        }
    }

    async fn authenticate(&mut self) -> Result<(), ExecuteError> {
        let Some(credentials) = self.credentials.clone() else {
            return Ok(());
        };
        let strategy = self
            .auth_strategy
            .clone()
            .ok_or(ConfigurationError::MissingAuthStrategy)?;

        if self.log {
            debug!(kind = credentials.kind(), "running auth strategy");
        }
        strategy.authenticate(self, &credentials).await?;
        Ok(())
    }

    fn build_request(&self, overrides: RequestOverrides) -> Result<TransportRequest, ConfigurationError> {
        let url = match overrides.url {
            Some(raw) => Url::parse(&raw).map_err(|e| DomainError::InvalidUri(format!("{e}: {raw}")))?,
            None => self.uri.to_url()?,
        };

        let mut headers = self.headers.clone();
        if let Some(extra) = &overrides.headers {
            headers.merge(extra);
        }

        Ok(TransportRequest {
            method: overrides.method.unwrap_or(self.method),
            url,
            headers,
            body: overrides.body.unwrap_or_else(|| self.body.clone()),
            cookies: self.cookie_jar.clone(),
            follow_redirect: overrides.follow_redirect.unwrap_or(self.follow_redirect),
            json_mode: overrides.json_mode.unwrap_or(self.json_mode),
            timeout: overrides.timeout.unwrap_or(self.timeout),
        })
    }

    fn evaluate(&self, response: &ResponseSpec) -> ExpectationErrors {
        let mut errors = ExpectationErrors::new();
        for expectation in &self.expectations {
            if let Err(failure) = expectation.run(response) {
                if self.log {
                    warn!(
                        expectation = expectation.label(),
                        message = %failure.message,
                        "expectation failed"
                    );
                }
                errors.insert(expectation.label().to_string(), failure);
            }
        }
        errors
    }
}
