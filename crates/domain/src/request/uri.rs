//! Composable request URI

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A base URI plus the path segments and query parameters composed onto it.
///
/// Composition never parses; the base is only validated by [`Uri::to_url`],
/// which is what the executor calls right before sending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Uri {
    base: String,
    #[serde(default)]
    segments: Vec<String>,
    #[serde(default)]
    query: Vec<QueryParam>,
}

impl Uri {
    /// Creates a URI from a base such as `http://localhost:8080/api`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            segments: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Returns the base this URI was created from.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Appends path segments. Slashes split `path` into several segments.
    pub fn push_path(&mut self, path: &str) {
        self.segments.extend(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(ToString::to_string),
        );
    }

    /// Sets a query parameter, replacing any earlier value for `key`.
    pub fn set_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|p| p.key == key) {
            Some(param) => param.value = value,
            None => self.query.push(QueryParam { key, value }),
        }
    }

    /// Returns the query parameters composed so far.
    #[must_use]
    pub fn query(&self) -> &[QueryParam] {
        &self.query
    }

    /// Resolves the base, segments and query into an absolute URL.
    ///
    /// Query parameters already present in the base are kept unless a
    /// composed parameter uses the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the base does not parse or cannot carry a path.
    pub fn to_url(&self) -> DomainResult<Url> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| DomainError::InvalidUri(format!("{e}: {}", self.base)))?;

        if !self.segments.is_empty() {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| DomainError::CannotBeABase(self.base.clone()))?;
            path.pop_if_empty();
            path.extend(self.segments.iter().map(String::as_str));
        }

        if !self.query.is_empty() {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| !self.query.iter().any(|p| p.key == *key))
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();

            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            pairs.extend_pairs(self.query.iter().map(|p| (p.key.as_str(), p.value.as_str())));
        }

        Ok(url)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_url() {
            Ok(url) => write!(f, "{url}"),
            Err(_) => f.write_str(&self.base),
        }
    }
}

impl From<&str> for Uri {
    fn from(base: &str) -> Self {
        Self::new(base)
    }
}

impl From<String> for Uri {
    fn from(base: String) -> Self {
        Self::new(base)
    }
}
