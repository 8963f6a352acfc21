//! Authentication domain types

mod types;

pub use types::{AuthError, Credentials};
