//! HTTP Client port

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;
use vouch_domain::{Body, CookieJar, Headers, HttpMethod, ResponseSpec};

/// Everything the transport needs for one round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Fully resolved URL.
    pub url: Url,
    /// Request headers.
    pub headers: Headers,
    /// Request body.
    pub body: Body,
    /// Cookies to send with the request.
    pub cookies: CookieJar,
    /// Whether 3xx responses are followed.
    pub follow_redirect: bool,
    /// Whether the body is sent and parsed as JSON.
    pub json_mode: bool,
    /// Upper bound for the whole round trip.
    pub timeout: Duration,
}

/// Errors raised by the transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The round trip exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect chain was too long.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Port for performing the HTTP round trip.
///
/// This trait abstracts the HTTP client implementation, so the executor can
/// run against reqwest in production and a recording mock in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends one request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems. A non-2xx status is not an
    /// error.
    async fn send(&self, request: TransportRequest) -> Result<ResponseSpec, HttpClientError>;
}
