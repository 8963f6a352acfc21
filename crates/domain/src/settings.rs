//! Seed values for new tests.
//!
//! A `Defaults` value is copied into every test at construction. Changing
//! the defaults afterwards never reaches tests that already exist.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cookie::CookieJar;
use crate::request::{Body, Headers, HttpMethod};

/// Base URI used when nothing else is configured.
pub const DEFAULT_URI: &str = "http://localhost:80";

/// Transport timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Seed configuration for newly constructed tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Base URI.
    #[serde(default = "default_uri")]
    pub uri: String,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
    /// Headers sent by every test.
    #[serde(default)]
    pub headers: Headers,
    /// Cookies pre-loaded into every jar.
    #[serde(default)]
    pub cookies: CookieJar,
    /// Request body.
    #[serde(default)]
    pub body: Body,
    /// Transport timeout.
    #[serde(default = "default_timeout", with = "crate::serde_millis")]
    pub timeout: Duration,
}

fn default_uri() -> String {
    DEFAULT_URI.to_string()
}

const fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            method: HttpMethod::default(),
            headers: Headers::new(),
            cookies: CookieJar::new(),
            body: Body::Empty,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Defaults {
    /// Sets or overrides one default header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Sets or overrides one default cookie.
    pub fn set_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.set(name, value);
    }
}
