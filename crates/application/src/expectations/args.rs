//! Arguments passed to a check factory.

use serde_json::{Map, Value};
use thiserror::Error;

/// A factory rejected its arguments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ArgumentError(pub String);

/// Positional arguments for an expectation, as JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectArgs(Vec<Value>);

impl ExpectArgs {
    /// Wrap positional arguments.
    #[must_use]
    pub const fn new(args: Vec<Value>) -> Self {
        Self(args)
    }

    /// Argument at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Argument at `index`, or an error naming the missing position.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than `index + 1` arguments were given.
    pub fn required(&self, index: usize) -> Result<&Value, ArgumentError> {
        self.get(index)
            .ok_or_else(|| ArgumentError(format!("missing argument #{}", index + 1)))
    }

    /// Argument at `index` as an HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not in `100..=999`.
    pub fn status(&self, index: usize) -> Result<u16, ArgumentError> {
        let value = self.required(index)?;
        value
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .filter(|n| (100..=999).contains(n))
            .ok_or_else(|| ArgumentError(format!("expected a status code, got {value}")))
    }

    /// Argument at `index` as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not an object.
    pub fn object(&self, index: usize) -> Result<&Map<String, Value>, ArgumentError> {
        let value = self.required(index)?;
        value
            .as_object()
            .ok_or_else(|| ArgumentError(format!("expected an object, got {value}")))
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no arguments were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for ExpectArgs {
    fn from(args: Vec<Value>) -> Self {
        Self(args)
    }
}

impl FromIterator<Value> for ExpectArgs {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
