//! Typed shortcuts for the built-in expectations.

use serde_json::{Map, Value};
use vouch_application::ApiTest;

use super::{EXPECT_BODY, EXPECT_COOKIES, EXPECT_HEADERS, EXPECT_PARTIAL_BODY, EXPECT_STATUS};

/// Typed builder methods for the built-in expectations.
///
/// Each call goes through the test's registry exactly like
/// `test.expect("expectStatus", [json!(200)])`, so a registry without the
/// built-ins reports the usual deferred `UnknownExpectation`.
pub trait ResponseExpectations {
    /// Expect the response status to equal `status`.
    fn expect_status(&mut self, status: u16) -> &mut Self;

    /// Expect each header to have the given value, or to be absent for `None`.
    fn expect_headers<I, N, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, Option<V>)>,
        N: Into<String>,
        V: Into<String>;

    /// Expect the response to set each cookie to the given value, or not to
    /// set it for `None`.
    fn expect_cookies<I, N, V>(&mut self, cookies: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, Option<V>)>,
        N: Into<String>,
        V: Into<String>;

    /// Expect the whole body to equal `body`.
    fn expect_body(&mut self, body: impl Into<Value>) -> &mut Self;

    /// Expect the body to contain `body`.
    fn expect_partial_body(&mut self, body: impl Into<Value>) -> &mut Self;
}

fn pairs_to_object<I, N, V>(pairs: I) -> Value
where
    I: IntoIterator<Item = (N, Option<V>)>,
    N: Into<String>,
    V: Into<String>,
{
    let map: Map<String, Value> = pairs
        .into_iter()
        .map(|(name, value)| {
            let value = value.map_or(Value::Null, |v| Value::String(v.into()));
            (name.into(), value)
        })
        .collect();
    Value::Object(map)
}

impl ResponseExpectations for ApiTest {
    fn expect_status(&mut self, status: u16) -> &mut Self {
        self.expect(EXPECT_STATUS, [Value::from(status)])
    }

    fn expect_headers<I, N, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, Option<V>)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.expect(EXPECT_HEADERS, [pairs_to_object(headers)])
    }

    fn expect_cookies<I, N, V>(&mut self, cookies: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, Option<V>)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.expect(EXPECT_COOKIES, [pairs_to_object(cookies)])
    }

    fn expect_body(&mut self, body: impl Into<Value>) -> &mut Self {
        self.expect(EXPECT_BODY, [body.into()])
    }

    fn expect_partial_body(&mut self, body: impl Into<Value>) -> &mut Self {
        self.expect(EXPECT_PARTIAL_BODY, [body.into()])
    }
}
