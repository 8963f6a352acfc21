//! Vouch - fluent HTTP expectations
//!
//! Describe one request, attach any number of expectations, send it once and
//! get every failed expectation back together:
//!
//! ```no_run
//! use vouch::{ResponseExpectations, json};
//!
//! # async fn run() -> Result<(), vouch::ExecuteError> {
//! vouch::new("http://localhost:8080")
//!     .path("users/1")
//!     .json_mode(true)
//!     .expect_status(200)
//!     .expect_partial_body(json!({"name": "ada"}))
//!     .execute()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Tests built here share the process-wide defaults, expectation registry
//! and transport. Use [`with_client`] to send through another
//! [`HttpClient`].

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod transport;

use std::sync::Arc;

pub use config::{
    ENV_BASE_URI, ENV_METHOD, ENV_TIMEOUT_MS, defaults, load_defaults_from_env, reset_defaults,
    set_default_auth_strategy, set_default_body, set_default_cookie, set_default_header,
    set_default_method, set_default_timeout, set_default_uri,
};
pub use error::EnvError;
pub use logging::init_tracing;
pub use registry::{register, registry};
pub use transport::transport;

pub use serde_json::{Value, json};
pub use vouch_application::{
    ApiTest, ArgumentError, AuthStrategy, Check, CombinedError, ConfigurationError, ExecuteError,
    ExecuteResult, ExpectArgs, FnStrategy, HttpClient, HttpClientError, RequestOverrides,
    TransportRequest,
};
pub use vouch_domain::{
    AuthError, Body, Cookie, CookieJar, Credentials, Defaults, ExecutionResult, ExpectationErrors,
    ExpectationFailure, Header, Headers, HttpMethod, ResponseSpec, StatusCode, Uri,
};
pub use vouch_infrastructure::{
    ApiKeyAuth, ApiKeyLocation, BasicAuth, BearerAuth, ReqwestHttpClient, ResponseExpectations,
};

/// A test aimed at `uri`, otherwise seeded from the current defaults.
#[must_use]
pub fn new(uri: impl Into<Uri>) -> ApiTest {
    let mut test = with_client(transport());
    test.uri(uri);
    test
}

/// A test aimed at `uri` with `method`, otherwise seeded from the current
/// defaults.
#[must_use]
pub fn request(uri: impl Into<Uri>, method: HttpMethod) -> ApiTest {
    let mut test = new(uri);
    test.method(method);
    test
}

/// A test seeded entirely from the current defaults that sends through
/// `client` instead of the shared transport.
#[must_use]
pub fn with_client(client: Arc<dyn HttpClient>) -> ApiTest {
    let mut test = ApiTest::new(client, registry(), &defaults());
    if let Some(strategy) = config::default_auth_strategy() {
        test.set_auth_strategy(strategy);
    }
    test
}
