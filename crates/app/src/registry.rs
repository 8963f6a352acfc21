//! Process-wide expectation registry.

use std::sync::{Arc, LazyLock};

use tracing::warn;
use vouch_application::{ApiTest, ArgumentError, Check, ConfigurationError, ExpectArgs, ExpectationRegistry};
use vouch_infrastructure::install_builtins;

static REGISTRY: LazyLock<Arc<ExpectationRegistry>> = LazyLock::new(|| {
    let registry = ExpectationRegistry::new();
    if let Err(err) = install_builtins(&registry) {
        warn!(error = %err, "built-in expectations not installed");
    }
    Arc::new(registry)
});

/// The registry every facade-built test resolves expectations against.
///
/// It starts out holding the built-in expectations.
#[must_use]
pub fn registry() -> Arc<ExpectationRegistry> {
    Arc::clone(&REGISTRY)
}

/// Install a new expectation kind for every test, existing ones included.
///
/// # Errors
///
/// Returns an error for an empty name or a name that is already taken.
pub fn register<F>(method: &str, factory: F, label: Option<&str>) -> Result<(), ConfigurationError>
where
    F: Fn(&ApiTest, &ExpectArgs) -> Result<Check, ArgumentError> + Send + Sync + 'static,
{
    REGISTRY.register(method, factory, label)
}
