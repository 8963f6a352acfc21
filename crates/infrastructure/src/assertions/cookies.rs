//! Checks on the cookies a response sets.

use vouch_application::{ApiTest, ArgumentError, Check, ExpectArgs};
use vouch_domain::{CookieJar, ExpectationFailure, ResponseSpec};

use super::headers::expected_pairs;

/// `expectCookies({name: value})`: the response's `Set-Cookie` headers set
/// every named cookie to the given value; `null` means the response must not
/// set it.
///
/// Only this response counts. Cookies already in the test's jar are ignored.
///
/// # Errors
///
/// Returns an error unless the first argument is an object of scalar values.
pub fn cookies_factory(_: &ApiTest, args: &ExpectArgs) -> Result<Check, ArgumentError> {
    let expected = expected_pairs(args)?;

    Ok(Box::new(move |response: &ResponseSpec| {
        let mut set = CookieJar::new();
        // Malformed Set-Cookie values simply don't count as set.
        let _ = set.store_response_cookies(response);

        let problems: Vec<String> = expected
            .iter()
            .filter_map(|(name, value)| match (value, set.get(name)) {
                (None, None) => None,
                (None, Some(actual)) => Some(format!(
                    "Cookie '{name}' should not be set, got '{actual}'"
                )),
                (Some(_), None) => Some(format!("Cookie '{name}' was not set")),
                (Some(want), Some(actual)) if want == actual => None,
                (Some(want), Some(actual)) => Some(format!(
                    "Cookie '{name}' value mismatch: expected '{want}', got '{actual}'"
                )),
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ExpectationFailure::new(problems.join("; ")))
        }
    }))
}
