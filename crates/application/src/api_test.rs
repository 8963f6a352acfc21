//! The fluent request/expectation builder.
//!
//! An [`ApiTest`] accumulates one request and the expectations about its
//! response. Every mutator takes `&mut self` and hands the same builder back,
//! so calls chain in any order; scalar fields keep the last value written.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use vouch_domain::{
    Body, CookieJar, Credentials, Defaults, ExpectationFailure, Headers, HttpMethod,
    ResponseSpec, Uri,
};

use crate::auth::AuthStrategy;
use crate::error::ConfigurationError;
use crate::expectations::{ExpectArgs, Expectation, ExpectationRegistry};
use crate::ports::HttpClient;

/// One HTTP request plus the expectations its response must meet.
pub struct ApiTest {
    pub(crate) uri: Uri,
    pub(crate) method: HttpMethod,
    pub(crate) body: Body,
    pub(crate) headers: Headers,
    pub(crate) cookie_jar: CookieJar,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) auth_strategy: Option<Arc<dyn AuthStrategy>>,
    pub(crate) follow_redirect: bool,
    pub(crate) json_mode: bool,
    pub(crate) timeout: Duration,
    pub(crate) log: bool,
    pub(crate) expectations: Vec<Expectation>,
    pub(crate) deferred: Option<ConfigurationError>,
    pub(crate) client: Arc<dyn HttpClient>,
    pub(crate) registry: Arc<ExpectationRegistry>,
}

impl ApiTest {
    /// Creates a test seeded from `defaults`.
    ///
    /// The defaults are copied; later changes to them do not reach this test.
    #[must_use]
    pub fn new(
        client: Arc<dyn HttpClient>,
        registry: Arc<ExpectationRegistry>,
        defaults: &Defaults,
    ) -> Self {
        Self {
            uri: Uri::new(defaults.uri.clone()),
            method: defaults.method,
            body: defaults.body.clone(),
            headers: defaults.headers.clone(),
            cookie_jar: defaults.cookies.clone(),
            credentials: None,
            auth_strategy: None,
            follow_redirect: false,
            json_mode: false,
            timeout: defaults.timeout,
            log: true,
            expectations: Vec::new(),
            deferred: None,
            client,
            registry,
        }
    }

    /// Replaces the base URI, dropping any composed path or query.
    pub fn uri(&mut self, uri: impl Into<Uri>) -> &mut Self {
        self.uri = uri.into();
        self
    }

    /// Sets the HTTP method.
    pub fn method(&mut self, method: HttpMethod) -> &mut Self {
        self.method = method;
        self
    }

    /// Sets the request body.
    pub fn body(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Sets a header, replacing an existing one with the same name.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    /// Removes a header.
    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    /// Appends path segments to the URI.
    pub fn path(&mut self, path: &str) -> &mut Self {
        self.uri.push_path(path);
        self
    }

    /// Sets a query parameter on the URI.
    pub fn query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.uri.set_query(key, value);
        self
    }

    /// Puts a cookie into the jar.
    pub fn cookie(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.cookie_jar.set(name, value);
        self
    }

    /// Empties the cookie jar.
    pub fn clear_cookies(&mut self) -> &mut Self {
        self.cookie_jar.clear();
        self
    }

    /// Stores credentials for the auth strategy. Nothing is sent until the
    /// next execution.
    pub fn login(&mut self, credentials: impl Into<Credentials>) -> &mut Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// Discards stored credentials.
    pub fn logout(&mut self) -> &mut Self {
        self.credentials = None;
        self
    }

    /// Sets the strategy that applies credentials before each execution.
    pub fn set_auth_strategy(&mut self, strategy: Arc<dyn AuthStrategy>) -> &mut Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Whether the transport follows redirects.
    pub fn follow_redirect(&mut self, follow: bool) -> &mut Self {
        self.follow_redirect = follow;
        self
    }

    /// Whether the body is sent and parsed as JSON.
    pub fn json_mode(&mut self, enabled: bool) -> &mut Self {
        self.json_mode = enabled;
        self
    }

    /// Sets the transport timeout.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Whether executions emit `tracing` events.
    pub fn log(&mut self, enabled: bool) -> &mut Self {
        self.log = enabled;
        self
    }

    /// Alias of [`ApiTest::log`].
    pub fn debug(&mut self, enabled: bool) -> &mut Self {
        self.log(enabled)
    }

    /// Adds a registered expectation.
    ///
    /// An unknown `method` or arguments the factory rejects are held back and
    /// reported by the next execution, before anything is sent. Only the
    /// first such problem is kept.
    pub fn expect<I>(&mut self, method: &str, args: I) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        let args: ExpectArgs = args.into_iter().collect();
        if let Err(err) = self.push_registered(method, &args) {
            debug!(method, error = %err, "deferring expectation error");
            self.deferred.get_or_insert(err);
        }
        self
    }

    /// Adds a registered expectation, reporting problems immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if `method` is unknown or its factory rejects `args`.
    pub fn try_expect<I>(&mut self, method: &str, args: I) -> Result<&mut Self, ConfigurationError>
    where
        I: IntoIterator<Item = Value>,
    {
        let args: ExpectArgs = args.into_iter().collect();
        self.push_registered(method, &args)?;
        Ok(self)
    }

    /// Adds an ad-hoc check that bypasses the registry.
    pub fn with_expectation<F>(&mut self, label: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&ResponseSpec) -> Result<(), ExpectationFailure> + Send + Sync + 'static,
    {
        self.expectations.push(Expectation::new(label, Box::new(check)));
        self
    }

    fn push_registered(&mut self, method: &str, args: &ExpectArgs) -> Result<(), ConfigurationError> {
        let registry = Arc::clone(&self.registry);
        let expectation = registry.build(method, self, args)?;
        self.expectations.push(expectation);
        Ok(())
    }

    /// The request URI as composed so far.
    #[must_use]
    pub const fn request_uri(&self) -> &Uri {
        &self.uri
    }

    /// The HTTP method.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.method
    }

    /// The request body.
    #[must_use]
    pub const fn request_body(&self) -> &Body {
        &self.body
    }

    /// The request headers.
    #[must_use]
    pub const fn request_headers(&self) -> &Headers {
        &self.headers
    }

    /// The cookie jar.
    #[must_use]
    pub const fn cookies(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Stored credentials, if logged in.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Check if credentials are stored.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.credentials.is_some()
    }

    /// Check if the transport will follow redirects.
    #[must_use]
    pub const fn follows_redirects(&self) -> bool {
        self.follow_redirect
    }

    /// Check if JSON mode is on.
    #[must_use]
    pub const fn is_json_mode(&self) -> bool {
        self.json_mode
    }

    /// The transport timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Labels of the expectations, in registration order.
    #[must_use]
    pub fn expectation_labels(&self) -> Vec<&str> {
        self.expectations.iter().map(Expectation::label).collect()
    }

    /// The transport this test sends through, for strategies that need
    /// their own round trip.
    #[must_use]
    pub fn client(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.client)
    }

    /// The registry expectations are resolved against.
    #[must_use]
    pub fn registry(&self) -> Arc<ExpectationRegistry> {
        Arc::clone(&self.registry)
    }
}

impl fmt::Debug for ApiTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiTest")
            .field("uri", &self.uri.to_string())
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("cookies", &self.cookie_jar)
            .field("logged_in", &self.credentials.is_some())
            .field("expectations", &self.expectation_labels())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::expectations::{ArgumentError, Check};
    use crate::ports::{HttpClientError, TransportRequest};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Unreachable;

    #[async_trait]
    impl HttpClient for Unreachable {
        async fn send(&self, _: TransportRequest) -> Result<ResponseSpec, HttpClientError> {
            Err(HttpClientError::Other("not used".to_string()))
        }
    }

    fn status_factory(_: &ApiTest, args: &ExpectArgs) -> Result<Check, ArgumentError> {
        let expected = args.status(0)?;
        Ok(Box::new(move |r: &ResponseSpec| {
            if r.status == expected {
                Ok(())
            } else {
                Err(ExpectationFailure::new("status differs"))
            }
        }))
    }

    fn test_with_defaults(defaults: &Defaults) -> ApiTest {
        let registry = ExpectationRegistry::new();
        registry
            .register("expectStatus", status_factory, Some("Status"))
            .unwrap();
        ApiTest::new(Arc::new(Unreachable), Arc::new(registry), defaults)
    }

    #[test]
    fn test_new_snapshots_defaults() {
        let mut defaults = Defaults::default();
        defaults.uri = "http://api.test".to_string();
        defaults.set_header("X-Env", "ci");
        defaults.set_cookie("lang", "en");

        let test = test_with_defaults(&defaults);
        defaults.set_header("X-Env", "changed");

        assert_eq!(test.request_uri().base(), "http://api.test");
        assert_eq!(test.request_headers().get("x-env"), Some("ci"));
        assert_eq!(test.cookies().get("lang"), Some("en"));
        assert_eq!(test.request_timeout(), Duration::from_millis(3000));
    }

    #[test]
    fn test_scalar_fields_last_write_wins() {
        let mut test = test_with_defaults(&Defaults::default());
        test.method(HttpMethod::Post)
            .body("first")
            .method(HttpMethod::Put)
            .body(json!({"second": true}));

        assert_eq!(test.http_method(), HttpMethod::Put);
        assert_eq!(test.request_body(), &Body::Json(json!({"second": true})));
    }

    #[test]
    fn test_path_and_query_compose() {
        let mut test = test_with_defaults(&Defaults::default());
        test.uri("http://x/api")
            .query("page", "1")
            .path("users")
            .path("42")
            .query("page", "2");

        assert_eq!(test.request_uri().to_string(), "http://x/api/users/42?page=2");
    }

    #[test]
    fn test_header_twice_is_same_as_once() {
        let mut once = test_with_defaults(&Defaults::default());
        once.header("a", "1");
        let mut twice = test_with_defaults(&Defaults::default());
        twice.header("a", "1").header("a", "1");

        assert_eq!(once.request_headers(), twice.request_headers());

        twice.remove_header("A");
        assert!(twice.request_headers().is_empty());
    }

    #[test]
    fn test_login_logout_only_touch_credentials() {
        let mut test = test_with_defaults(&Defaults::default());
        test.login(Credentials::basic("ada", "lovelace"));
        assert!(test.is_logged_in());
        assert_eq!(test.credentials().map(Credentials::kind), Some("basic"));

        test.logout();
        assert!(!test.is_logged_in());
    }

    #[test]
    fn test_expect_appends_in_order() {
        let mut test = test_with_defaults(&Defaults::default());
        test.expect("expectStatus", [json!(200)])
            .with_expectation("Custom", |_: &ResponseSpec| Ok(()));

        assert_eq!(test.expectation_labels(), vec!["Status", "Custom"]);
        assert!(test.deferred.is_none());
    }

    #[test]
    fn test_expect_unknown_is_deferred() {
        let mut test = test_with_defaults(&Defaults::default());
        test.expect("expectNothing", Vec::<Value>::new())
            .expect("expectStatus", [json!("nope")]);

        assert!(test.expectation_labels().is_empty());
        assert_eq!(
            test.deferred,
            Some(ConfigurationError::UnknownExpectation("expectNothing".to_string()))
        );
    }

    #[test]
    fn test_try_expect_reports_immediately() {
        let mut test = test_with_defaults(&Defaults::default());
        let err = test.try_expect("expectStatus", [json!("nope")]).unwrap_err();

        assert!(matches!(err, ConfigurationError::InvalidArguments { ref method, .. } if method == "expectStatus"));
        assert!(test.deferred.is_none());
    }
}
