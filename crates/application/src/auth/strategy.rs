//! Authentication strategy trait.

use async_trait::async_trait;
use vouch_domain::{AuthError, Credentials};

use crate::api_test::ApiTest;

/// Turns stored credentials into request state.
///
/// Implementations may do anything async (including their own login round
/// trip through [`ApiTest::client`]) but must change the outgoing request
/// only through the builder, e.g. by setting a header or a cookie.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Apply `credentials` to `test`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be used. The execution is
    /// aborted before any request is sent.
    async fn authenticate(
        &self,
        test: &mut ApiTest,
        credentials: &Credentials,
    ) -> Result<(), AuthError>;
}

/// Adapts a synchronous closure into an [`AuthStrategy`].
pub struct FnStrategy<F>(F);

impl<F> FnStrategy<F>
where
    F: Fn(&mut ApiTest, &Credentials) -> Result<(), AuthError> + Send + Sync,
{
    /// Wrap a closure.
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> AuthStrategy for FnStrategy<F>
where
    F: Fn(&mut ApiTest, &Credentials) -> Result<(), AuthError> + Send + Sync,
{
    async fn authenticate(
        &self,
        test: &mut ApiTest,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        (self.0)(test, credentials)
    }
}
