//! Facade error types

use thiserror::Error;

/// Errors raised while reading defaults from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A timeout variable was not a whole number of milliseconds.
    #[error("{name} must be a number of milliseconds, got `{value}`")]
    InvalidTimeout {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A method variable named no known HTTP method.
    #[error("{name} must be an HTTP method, got `{value}`")]
    InvalidMethod {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}
