//! HTTP request domain types

mod body;
mod header;
mod method;
mod uri;

pub use body::Body;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use uri::{QueryParam, Uri};
