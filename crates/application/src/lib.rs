//! Vouch Application - Builder, registry and executor
//!
//! This crate defines the application layer with:
//! - The [`ApiTest`] builder and its execution cycle
//! - The expectation registry plugins are installed into
//! - Port traits for the transport and the auth hook
//! - Application-level error handling

pub mod api_test;
pub mod auth;
pub mod error;
pub mod execute_request;
pub mod expectations;
pub mod ports;

pub use api_test::ApiTest;
pub use auth::{AuthStrategy, FnStrategy};
pub use error::{CombinedError, ConfigurationError, ExecuteError, ExecuteResult};
pub use execute_request::RequestOverrides;
pub use expectations::{
    ArgumentError, Check, CheckFactory, ExpectArgs, Expectation, ExpectationRegistry,
    default_label,
};
pub use ports::{HttpClient, HttpClientError, TransportRequest};
