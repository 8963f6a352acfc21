//! Registry of installable expectation kinds.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{ArgumentError, Check, CheckFactory, ExpectArgs, Expectation};
use crate::api_test::ApiTest;
use crate::error::ConfigurationError;

#[derive(Clone)]
struct Registration {
    label: String,
    factory: CheckFactory,
}

/// Method name → check factory, shared by every test built against it.
///
/// Entries are permanent: a name can be registered once and never removed,
/// so built-ins and earlier plugins cannot be replaced behind a caller's
/// back.
#[derive(Default)]
pub struct ExpectationRegistry {
    entries: RwLock<HashMap<String, Registration>>,
}

impl ExpectationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new expectation kind under `method`.
    ///
    /// Failures are reported under `label`, or under the method name with
    /// its first letter capitalized when no label is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingExpectationName`] for an empty
    /// name and [`ConfigurationError::DuplicateExpectation`] if the name is
    /// taken. The existing registration is left untouched.
    pub fn register<F>(
        &self,
        method: &str,
        factory: F,
        label: Option<&str>,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&ApiTest, &ExpectArgs) -> Result<Check, ArgumentError> + Send + Sync + 'static,
    {
        let method = method.trim();
        if method.is_empty() {
            return Err(ConfigurationError::MissingExpectationName);
        }

        let mut entries = self.entries.write();
        if entries.contains_key(method) {
            return Err(ConfigurationError::DuplicateExpectation(method.to_string()));
        }

        let label = label
            .filter(|l| !l.is_empty())
            .map_or_else(|| default_label(method), ToString::to_string);
        debug!(method, label = %label, "registered expectation");
        entries.insert(
            method.to_string(),
            Registration {
                label,
                factory: Arc::new(factory),
            },
        );
        Ok(())
    }

    /// Check if `method` is registered.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.entries.read().contains_key(method)
    }

    /// Display label of a registered method.
    #[must_use]
    pub fn label(&self, method: &str) -> Option<String> {
        self.entries.read().get(method).map(|r| r.label.clone())
    }

    /// Registered method names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Build an expectation for `test` from a registered factory.
    ///
    /// The factory runs outside the registry lock, so it may itself consult
    /// the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if `method` is unknown or the factory rejects `args`.
    pub fn build(
        &self,
        method: &str,
        test: &ApiTest,
        args: &ExpectArgs,
    ) -> Result<Expectation, ConfigurationError> {
        let registration = self
            .entries
            .read()
            .get(method)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownExpectation(method.to_string()))?;

        let check = (registration.factory)(test, args).map_err(|e| {
            ConfigurationError::InvalidArguments {
                method: method.to_string(),
                message: e.0,
            }
        })?;

        Ok(Expectation::new(registration.label, check))
    }
}

impl std::fmt::Debug for ExpectationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpectationRegistry")
            .field("methods", &self.names())
            .finish()
    }
}

/// The method name with its first character upper-cased.
#[must_use]
pub fn default_label(method: &str) -> String {
    let mut chars = method.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
