//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It keeps two clients because reqwest fixes the redirect policy per client.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, RequestBuilder};
use tracing::trace;
use vouch_application::ports::{HttpClient, HttpClientError, TransportRequest};
use vouch_domain::{Body, Header, HttpMethod, ResponseSpec};

/// Redirect limit when redirects are followed.
const MAX_REDIRECTS: usize = 10;

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client implementation using reqwest.
///
/// This is the transport every facade-built test uses unless another
/// [`HttpClient`] is injected.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    following: Client,
    direct: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10, only when the request asks for it
    /// - TLS verification: enabled
    /// - User-Agent: "Vouch/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns an error if either client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let build = |policy| {
            Client::builder()
                .user_agent(concat!("Vouch/", env!("CARGO_PKG_VERSION")))
                .redirect(policy)
                .build()
                .map_err(|e| HttpClientError::Other(e.to_string()))
        };

        Ok(Self {
            following: build(Policy::limited(MAX_REDIRECTS))?,
            direct: build(Policy::none())?,
        })
    }

    /// Creates a client from two preconfigured reqwest clients, one used
    /// when redirects are followed and one used when they are not.
    #[must_use]
    pub const fn with_clients(following: Client, direct: Client) -> Self {
        Self { following, direct }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Trace => Method::TRACE,
        }
    }

    /// Builds the reqwest request for one transport request.
    fn prepare(&self, request: &TransportRequest) -> Result<RequestBuilder, HttpClientError> {
        let client = if request.follow_redirect {
            &self.following
        } else {
            &self.direct
        };

        let mut builder = client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(request.timeout);

        let mut explicit_cookie = None;
        for header in request.headers.iter() {
            if header.is_named("cookie") {
                explicit_cookie = Some(header.value.as_str());
            } else {
                builder = builder.header(&header.name, &header.value);
            }
        }

        let cookie = match (explicit_cookie, request.cookies.cookie_header()) {
            (Some(explicit), Some(jar)) => Some(format!("{explicit}; {jar}")),
            (Some(explicit), None) => Some(explicit.to_string()),
            (None, jar) => jar,
        };
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", cookie);
        }

        if request.json_mode && !request.headers.contains("accept") {
            builder = builder.header("Accept", JSON_CONTENT_TYPE);
        }

        Self::build_body(builder, request)
    }

    /// Attaches the body and, when the caller did not set one, its content type.
    fn build_body(
        builder: RequestBuilder,
        request: &TransportRequest,
    ) -> Result<RequestBuilder, HttpClientError> {
        if request.body.is_empty() {
            return Ok(builder);
        }

        let (content, content_type) = if request.json_mode {
            let content = serde_json::to_string(&request.body.to_json())
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
            (content, Some(JSON_CONTENT_TYPE))
        } else {
            (request.body.to_text(), request.body.content_type())
        };

        let builder = match content_type {
            Some(ct) if !request.headers.contains("content-type") => {
                builder.header("Content-Type", ct)
            }
            _ => builder,
        };
        Ok(builder.body(content))
    }

    /// Turns the raw response text into a body, parsing it in JSON mode.
    fn parse_body(text: String, json_mode: bool) -> Body {
        if text.is_empty() {
            return Body::Empty;
        }
        if json_mode && let Ok(value) = serde_json::from_str(&text) {
            return Body::Json(value);
        }
        Body::Text(text)
    }

    /// Maps reqwest errors to domain `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: TransportRequest) -> Result<ResponseSpec, HttpClientError> {
        let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);
        let builder = self.prepare(&request)?;

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();

        // Repeated headers such as Set-Cookie stay separate entries.
        let headers: Vec<Header> = response
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), String::from_utf8_lossy(v.as_bytes())))
            .collect();

        let text = response
            .text()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        let duration = start.elapsed();

        trace!(status, bytes = text.len(), "response received");
        Ok(ResponseSpec::new(
            status,
            headers,
            Self::parse_body(text, request.json_mode),
            duration,
        ))
    }
}
