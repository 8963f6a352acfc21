//! Body equality and containment.

use serde_json::Value;
use vouch_application::{ApiTest, ArgumentError, Check, ExpectArgs};
use vouch_domain::{Body, ExpectationFailure, ResponseSpec};

use super::preview;

/// `expectBody(expected)`: the whole body equals `expected`.
///
/// JSON is compared structurally, so key order and whitespace do not
/// matter. A string argument also matches a text body exactly.
///
/// # Errors
///
/// Returns an error if the argument is missing.
pub fn body_factory(_: &ApiTest, args: &ExpectArgs) -> Result<Check, ArgumentError> {
    let expected = args.required(0)?.clone();

    Ok(Box::new(move |response: &ResponseSpec| {
        let actual = response.body.to_json();
        let text_matches = match (&expected, &response.body) {
            (Value::String(want), Body::Text(text)) => want == text,
            (Value::String(want), Body::Empty) => want.is_empty(),
            _ => false,
        };
        if text_matches || actual == expected {
            return Ok(());
        }
        Err(mismatch("Body does not match expected value", &expected, &response.body))
    }))
}

/// `expectPartialBody(expected)`: the body contains `expected`.
///
/// See [`contains`] for the rules. A string argument against a text body is
/// a substring check.
///
/// # Errors
///
/// Returns an error if the argument is missing.
pub fn partial_body_factory(_: &ApiTest, args: &ExpectArgs) -> Result<Check, ArgumentError> {
    let expected = args.required(0)?.clone();

    Ok(Box::new(move |response: &ResponseSpec| {
        let found = match (&expected, &response.body) {
            (Value::String(needle), Body::Text(text)) => text.contains(needle.as_str()),
            (Value::String(needle), Body::Empty) => needle.is_empty(),
            _ => contains(&response.body.to_json(), &expected),
        };
        if found {
            return Ok(());
        }
        Err(mismatch("Body does not contain expected value", &expected, &response.body))
    }))
}

/// Check if `actual` contains `expected`.
///
/// - objects: every expected key is present and its value is contained
/// - arrays: every expected element is contained in some actual element
/// - anything else: equality
#[must_use]
pub fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(key, want)| actual.get(key).is_some_and(|got| contains(got, want))),
        (Value::Array(actual), Value::Array(expected)) => expected
            .iter()
            .all(|want| actual.iter().any(|got| contains(got, want))),
        _ => actual == expected,
    }
}

fn mismatch(message: &str, expected: &Value, actual: &Body) -> ExpectationFailure {
    let expected = match expected {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    ExpectationFailure::mismatch(message, preview(&expected), preview(&actual.to_text()))
}
