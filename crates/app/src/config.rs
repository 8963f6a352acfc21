//! Process-wide defaults.
//!
//! Every test built by the facade starts from a copy of these values.
//! Changing them never reaches tests that already exist.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;
use vouch_application::AuthStrategy;
use vouch_domain::{Body, Defaults, HttpMethod};

use crate::error::EnvError;

/// Base URI variable read by [`load_defaults_from_env`].
pub const ENV_BASE_URI: &str = "VOUCH_BASE_URI";
/// Timeout variable (milliseconds) read by [`load_defaults_from_env`].
pub const ENV_TIMEOUT_MS: &str = "VOUCH_TIMEOUT_MS";
/// Method variable read by [`load_defaults_from_env`].
pub const ENV_METHOD: &str = "VOUCH_METHOD";

static DEFAULTS: LazyLock<RwLock<Defaults>> = LazyLock::new(|| RwLock::new(Defaults::default()));

static AUTH_STRATEGY: LazyLock<RwLock<Option<Arc<dyn AuthStrategy>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Snapshot of the current defaults.
#[must_use]
pub fn defaults() -> Defaults {
    DEFAULTS.read().clone()
}

/// Set the base URI of new tests.
pub fn set_default_uri(uri: impl Into<String>) {
    DEFAULTS.write().uri = uri.into();
}

/// Add or replace a header sent by new tests.
pub fn set_default_header(name: impl Into<String>, value: impl Into<String>) {
    DEFAULTS.write().set_header(name, value);
}

/// Add or replace a cookie pre-loaded into new tests' jars.
pub fn set_default_cookie(name: impl Into<String>, value: impl Into<String>) {
    DEFAULTS.write().set_cookie(name, value);
}

/// Set the request body of new tests.
pub fn set_default_body(body: impl Into<Body>) {
    DEFAULTS.write().body = body.into();
}

/// Set the HTTP method of new tests.
pub fn set_default_method(method: HttpMethod) {
    DEFAULTS.write().method = method;
}

/// Set the transport timeout of new tests.
pub fn set_default_timeout(timeout: Duration) {
    DEFAULTS.write().timeout = timeout;
}

/// Set the auth strategy new tests start with.
pub fn set_default_auth_strategy(strategy: Arc<dyn AuthStrategy>) {
    *AUTH_STRATEGY.write() = Some(strategy);
}

pub(crate) fn default_auth_strategy() -> Option<Arc<dyn AuthStrategy>> {
    AUTH_STRATEGY.read().clone()
}

/// Restore the built-in defaults and drop the default auth strategy.
pub fn reset_defaults() {
    *DEFAULTS.write() = Defaults::default();
    *AUTH_STRATEGY.write() = None;
}

/// Override defaults from `VOUCH_BASE_URI`, `VOUCH_TIMEOUT_MS` and
/// `VOUCH_METHOD`. Unset variables leave the current value alone.
///
/// # Errors
///
/// Returns an error if a variable is set to something unusable. Nothing is
/// changed in that case.
pub fn load_defaults_from_env() -> Result<(), EnvError> {
    let mut defaults = defaults();
    apply_env(&mut defaults, |name| std::env::var(name).ok())?;
    *DEFAULTS.write() = defaults;
    Ok(())
}

fn apply_env(
    defaults: &mut Defaults,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), EnvError> {
    if let Some(uri) = lookup(ENV_BASE_URI) {
        debug!(uri = %uri, "base URI from environment");
        defaults.uri = uri;
    }

    if let Some(value) = lookup(ENV_TIMEOUT_MS) {
        let millis = value
            .trim()
            .parse::<u64>()
            .map_err(|_| EnvError::InvalidTimeout {
                name: ENV_TIMEOUT_MS,
                value: value.clone(),
            })?;
        defaults.timeout = Duration::from_millis(millis);
    }

    if let Some(value) = lookup(ENV_METHOD) {
        defaults.method = value.parse().map_err(|_| EnvError::InvalidMethod {
            name: ENV_METHOD,
            value: value.clone(),
        })?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_apply_env_overrides_set_values() {
        let mut defaults = Defaults::default();
        apply_env(
            &mut defaults,
            lookup(&[
                ("VOUCH_BASE_URI", "http://api.test:8080"),
                ("VOUCH_TIMEOUT_MS", " 250 "),
                ("VOUCH_METHOD", "post"),
            ]),
        )
        .unwrap();

        assert_eq!(defaults.uri, "http://api.test:8080");
        assert_eq!(defaults.timeout, Duration::from_millis(250));
        assert_eq!(defaults.method, HttpMethod::Post);
    }

    #[test]
    fn test_apply_env_leaves_unset_values() {
        let mut defaults = Defaults::default();
        apply_env(&mut defaults, lookup(&[])).unwrap();
        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn test_apply_env_rejects_bad_timeout() {
        let mut defaults = Defaults::default();
        let err = apply_env(&mut defaults, lookup(&[("VOUCH_TIMEOUT_MS", "soon")])).unwrap_err();

        assert_eq!(
            err,
            EnvError::InvalidTimeout {
                name: "VOUCH_TIMEOUT_MS",
                value: "soon".to_string()
            }
        );
        assert_eq!(err.to_string(), "VOUCH_TIMEOUT_MS must be a number of milliseconds, got `soon`");
    }

    #[test]
    fn test_apply_env_rejects_bad_method() {
        let mut defaults = Defaults::default();
        let err = apply_env(&mut defaults, lookup(&[("VOUCH_METHOD", "FETCH")])).unwrap_err();
        assert!(matches!(err, EnvError::InvalidMethod { .. }));
    }
}
