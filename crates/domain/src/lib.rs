//! Vouch Domain - Core types
//!
//! This crate defines the data model shared by the Vouch layers: the request
//! pieces a test is built from, the response a transport returns, the cookie
//! jar and the outcome of running expectations.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod cookie;
pub mod error;
pub mod request;
pub mod response;
mod serde_millis;
pub mod settings;
pub mod testing;

pub use auth::{AuthError, Credentials};
pub use cookie::{Cookie, CookieJar};
pub use error::{DomainError, DomainResult};
pub use request::{Body, Header, Headers, HttpMethod, QueryParam, Uri};
pub use response::{ResponseSpec, StatusCode};
pub use settings::{DEFAULT_TIMEOUT, DEFAULT_URI, Defaults};
pub use testing::{ExecutionResult, ExpectationErrors, ExpectationFailure};
