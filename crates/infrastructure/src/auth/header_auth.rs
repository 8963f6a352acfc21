//! Strategies that turn credentials into a header or query parameter.

use async_trait::async_trait;
use base64::Engine;
use tracing::debug;
use vouch_application::{ApiTest, AuthStrategy};
use vouch_domain::{AuthError, Credentials};

const AUTHORIZATION: &str = "Authorization";

fn unsupported(credentials: &Credentials) -> AuthError {
    AuthError::UnsupportedCredentials {
        kind: credentials.kind().to_string(),
    }
}

/// HTTP Basic authentication.
///
/// Accepts [`Credentials::Basic`] and sets `Authorization: Basic <base64>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAuth;

impl BasicAuth {
    /// Encode a username and password as a Basic `Authorization` value.
    #[must_use]
    pub fn header_value(username: &str, password: &str) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        format!("Basic {encoded}")
    }
}

#[async_trait]
impl AuthStrategy for BasicAuth {
    async fn authenticate(
        &self,
        test: &mut ApiTest,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        let Credentials::Basic { username, password } = credentials else {
            return Err(unsupported(credentials));
        };
        debug!(username, "applying basic auth");
        test.header(AUTHORIZATION, Self::header_value(username, password));
        Ok(())
    }
}

/// Token authentication.
///
/// Accepts [`Credentials::Bearer`] and sets `Authorization: <prefix> <token>`.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    prefix: String,
}

impl BearerAuth {
    /// Token auth with the standard `Bearer` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("Bearer")
    }

    /// Token auth with a custom prefix such as `Token`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for BearerAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthStrategy for BearerAuth {
    async fn authenticate(
        &self,
        test: &mut ApiTest,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        let Credentials::Bearer { token } = credentials else {
            return Err(unsupported(credentials));
        };
        test.header(AUTHORIZATION, format!("{} {token}", self.prefix));
        Ok(())
    }
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiKeyLocation {
    /// As a request header.
    #[default]
    Header,
    /// As a query parameter.
    Query,
}

/// API key authentication.
///
/// Accepts [`Credentials::Custom`] holding `{"apiKey": "<key>"}` and sends
/// the key under `name`, either as a header or as a query parameter.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    name: String,
    location: ApiKeyLocation,
}

impl ApiKeyAuth {
    /// Send the key in the header `name`.
    #[must_use]
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ApiKeyLocation::Header,
        }
    }

    /// Send the key in the query parameter `name`.
    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ApiKeyLocation::Query,
        }
    }
}

#[async_trait]
impl AuthStrategy for ApiKeyAuth {
    async fn authenticate(
        &self,
        test: &mut ApiTest,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        let key = match credentials {
            Credentials::Custom(value) => value.get("apiKey").and_then(|k| k.as_str()),
            _ => None,
        }
        .ok_or_else(|| unsupported(credentials))?;

        match self.location {
            ApiKeyLocation::Header => test.header(&self.name, key),
            ApiKeyLocation::Query => test.query(&self.name, key),
        };
        Ok(())
    }
}
