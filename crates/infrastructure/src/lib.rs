//! Vouch Infrastructure - Adapters and built-in plugins
//!
//! This crate provides the reqwest implementation of the transport port,
//! the built-in expectations and the built-in auth strategies.

pub mod adapters;
pub mod assertions;
pub mod auth;

pub use adapters::ReqwestHttpClient;
pub use assertions::{ResponseExpectations, install_builtins};
pub use auth::{ApiKeyAuth, ApiKeyLocation, BasicAuth, BearerAuth};
