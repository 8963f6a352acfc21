//! Expectations and the registry that installs them.
//!
//! A registered expectation is a named factory. Calling it with arguments
//! produces a [`Check`] that inspects the response and reports a mismatch as
//! an [`ExpectationFailure`] instead of stopping the run.

mod args;
mod registry;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub use args::{ArgumentError, ExpectArgs};
pub use registry::{ExpectationRegistry, default_label};

use vouch_domain::{ExpectationFailure, ResponseSpec};

use crate::api_test::ApiTest;

/// A predicate over the response.
pub type Check = Box<dyn Fn(&ResponseSpec) -> Result<(), ExpectationFailure> + Send + Sync>;

/// Builds a [`Check`] from the test it is attached to and the caller's arguments.
pub type CheckFactory =
    Arc<dyn Fn(&ApiTest, &ExpectArgs) -> Result<Check, ArgumentError> + Send + Sync>;

/// A check tagged with the label its failures are reported under.
pub struct Expectation {
    label: String,
    check: Check,
}

impl Expectation {
    /// Tag a check with a display label.
    #[must_use]
    pub fn new(label: impl Into<String>, check: Check) -> Self {
        Self {
            label: label.into(),
            check,
        }
    }

    /// The label failures are reported under.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the check. A panicking check counts as a failure carrying the
    /// panic message, so `assert!`-style checks behave like returned errors.
    ///
    /// # Errors
    ///
    /// Returns the failure the check reported or panicked with.
    pub fn run(&self, response: &ResponseSpec) -> Result<(), ExpectationFailure> {
        panic::catch_unwind(AssertUnwindSafe(|| (self.check)(response)))
            .unwrap_or_else(|payload| Err(ExpectationFailure::new(panic_message(&*payload))))
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "check panicked".to_string())
}
