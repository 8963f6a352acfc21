//! Shared transport.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use tracing::warn;
use vouch_application::{HttpClient, HttpClientError, TransportRequest};
use vouch_domain::ResponseSpec;
use vouch_infrastructure::ReqwestHttpClient;

/// Stands in for a transport that could not be built and reports why on
/// every send.
struct Unavailable(HttpClientError);

#[async_trait]
impl HttpClient for Unavailable {
    async fn send(&self, _: TransportRequest) -> Result<ResponseSpec, HttpClientError> {
        Err(self.0.clone())
    }
}

static TRANSPORT: LazyLock<Arc<dyn HttpClient>> = LazyLock::new(|| {
    match ReqwestHttpClient::new() {
        Ok(client) => Arc::new(client) as Arc<dyn HttpClient>,
        Err(err) => {
            warn!(error = %err, "HTTP transport unavailable");
            Arc::new(Unavailable(err))
        }
    }
});

/// The reqwest transport shared by every facade-built test.
#[must_use]
pub fn transport() -> Arc<dyn HttpClient> {
    Arc::clone(&TRANSPORT)
}
