//! Cookie jar types.
//!
//! The jar replays raw `name=value` pairs. Attributes such as `Path`,
//! `Domain`, `Expires` or `Max-Age` are read past and never enforced.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::response::ResponseSpec;

/// A single cookie as replayed on later requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl Cookie {
    /// Create a new cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse the `name=value` pair that leads a `Set-Cookie` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header has no `=` or an empty name.
    pub fn from_set_cookie(header: &str) -> DomainResult<Self> {
        let pair = header.split(';').next().unwrap_or_default();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| DomainError::InvalidCookie(header.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidCookie(header.to_string()));
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        Ok(Self::new(name, value))
    }

    /// Format for the `Cookie` request header.
    #[must_use]
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Per-test cookie store, keyed by cookie name.
///
/// Insertion order is kept so the outgoing `Cookie` header is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    cookies: IndexMap<String, String>,
}

impl CookieJar {
    /// Create a new empty cookie jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie, replacing any earlier value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Get a cookie value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Remove a cookie by name.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.cookies.shift_remove(name)
    }

    /// Clear all cookies.
    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    /// Iterate over the stored cookies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Cookie> + '_ {
        self.cookies
            .iter()
            .map(|(name, value)| Cookie::new(name.clone(), value.clone()))
    }

    /// Get the total number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if the jar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Build the `Cookie` header value, or `None` when the jar is empty.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let pairs: Vec<String> = self.iter().map(|c| c.to_cookie_header()).collect();
        Some(pairs.join("; "))
    }

    /// Store one raw `Set-Cookie` header value.
    ///
    /// # Errors
    ///
    /// Returns an error if the header does not start with a `name=value` pair.
    pub fn store_set_cookie(&mut self, header: &str) -> DomainResult<()> {
        let cookie = Cookie::from_set_cookie(header)?;
        self.cookies.insert(cookie.name, cookie.value);
        Ok(())
    }

    /// Merge every `Set-Cookie` header of a response into the jar.
    ///
    /// Headers are applied in order, so the last value for a name wins.
    /// Malformed headers are skipped and returned to the caller.
    pub fn store_response_cookies(&mut self, response: &ResponseSpec) -> Vec<DomainError> {
        response
            .set_cookie_values()
            .filter_map(|header| self.store_set_cookie(header).err())
            .collect()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for CookieJar {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut jar = Self::new();
        for (name, value) in iter {
            jar.set(name, value);
        }
        jar
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::Header;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_cookie_from_set_cookie() {
        let cookie =
            Cookie::from_set_cookie("session=abc123; Path=/; HttpOnly; Secure; Max-Age=0").unwrap();
        assert_eq!(cookie, Cookie::new("session", "abc123"));

        let quoted = Cookie::from_set_cookie(r#"theme="dark""#).unwrap();
        assert_eq!(quoted.value, "dark");
    }

    #[test]
    fn test_cookie_from_set_cookie_rejects_garbage() {
        assert!(Cookie::from_set_cookie("no-equals-sign").is_err());
        assert!(Cookie::from_set_cookie("=value").is_err());
    }

    #[test]
    fn test_cookie_jar_header() {
        let jar: CookieJar = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(jar.cookie_header().as_deref(), Some("a=1; b=2"));
        assert_eq!(CookieJar::new().cookie_header(), None);
    }

    #[test]
    fn test_store_response_cookies_last_wins() {
        let response = ResponseSpec::new(
            200,
            vec![
                Header::new("Set-Cookie", "sid=first"),
                Header::new("set-cookie", "theme=dark"),
                Header::new("SET-COOKIE", "sid=second; Path=/"),
                Header::new("Set-Cookie", "broken"),
            ],
            "",
            Duration::ZERO,
        );

        let mut jar = CookieJar::new();
        jar.set("existing", "kept");
        let skipped = jar.store_response_cookies(&response);

        assert_eq!(skipped.len(), 1);
        assert_eq!(jar.get("sid"), Some("second"));
        assert_eq!(jar.get("theme"), Some("dark"));
        assert_eq!(jar.get("existing"), Some("kept"));
        assert_eq!(jar.len(), 3);
    }

    #[test]
    fn test_cookie_jar_remove_and_clear() {
        let mut jar: CookieJar = [("a", "1"), ("b", "2")].into_iter().collect();

        assert_eq!(jar.remove("a"), Some("1".to_string()));
        assert_eq!(jar.len(), 1);

        jar.clear();
        assert!(jar.is_empty());
    }
}
