//! Built-in auth strategies.

mod header_auth;

pub use header_auth::{ApiKeyAuth, ApiKeyLocation, BasicAuth, BearerAuth};
