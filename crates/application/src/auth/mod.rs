//! Authentication hook.
//!
//! A test holds optional credentials and an optional strategy. Before every
//! execution with credentials, the strategy runs and expresses its effect
//! through ordinary builder mutators.

mod strategy;

pub use strategy::{AuthStrategy, FnStrategy};
