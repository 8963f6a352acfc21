//! Built-in expectation plugins.
//!
//! Each plugin is an ordinary check factory installed through the same
//! registry path that third-party plugins use.

mod body;
mod cookies;
mod extension;
mod headers;
mod status;

use vouch_application::{ConfigurationError, ExpectationRegistry};

pub use body::{body_factory, contains, partial_body_factory};
pub use cookies::cookies_factory;
pub use extension::ResponseExpectations;
pub use headers::headers_factory;
pub use status::status_factory;

/// Method name of the status check.
pub const EXPECT_STATUS: &str = "expectStatus";
/// Method name of the header check.
pub const EXPECT_HEADERS: &str = "expectHeaders";
/// Method name of the response cookie check.
pub const EXPECT_COOKIES: &str = "expectCookies";
/// Method name of the full body check.
pub const EXPECT_BODY: &str = "expectBody";
/// Method name of the partial body check.
pub const EXPECT_PARTIAL_BODY: &str = "expectPartialBody";

/// Register every built-in expectation in `registry`.
///
/// # Errors
///
/// Returns an error if one of the built-in names is already taken.
pub fn install_builtins(registry: &ExpectationRegistry) -> Result<(), ConfigurationError> {
    registry.register(EXPECT_STATUS, status_factory, Some("Status"))?;
    registry.register(EXPECT_HEADERS, headers_factory, Some("Headers"))?;
    registry.register(EXPECT_COOKIES, cookies_factory, Some("Cookies"))?;
    registry.register(EXPECT_BODY, body_factory, Some("Body"))?;
    registry.register(EXPECT_PARTIAL_BODY, partial_body_factory, Some("Body"))?;
    Ok(())
}

/// Shorten long values for failure messages.
fn preview(text: &str) -> String {
    const LIMIT: usize = 100;
    match text.char_indices().nth(LIMIT) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
