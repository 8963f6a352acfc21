//! Response header checks.

use serde_json::Value;
use vouch_application::{ApiTest, ArgumentError, Check, ExpectArgs};
use vouch_domain::{ExpectationFailure, ResponseSpec};

/// Expected header value; `None` means the header must be absent.
type Expected = Vec<(String, Option<String>)>;

/// Reads a `{name: value}` object, allowing `null` and scalar values.
pub(super) fn expected_pairs(args: &ExpectArgs) -> Result<Expected, ArgumentError> {
    args.object(0)?
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ArgumentError(format!(
                        "expected value for `{name}` must be a string, number, boolean or null"
                    )));
                }
            };
            Ok((name.clone(), value))
        })
        .collect()
}

/// `expectHeaders({name: value})`: every named header is present with the
/// given value; a `null` value means the header must be absent.
///
/// Names match case-insensitively. A repeated header passes if any of its
/// values matches.
///
/// # Errors
///
/// Returns an error unless the first argument is an object of scalar values.
pub fn headers_factory(_: &ApiTest, args: &ExpectArgs) -> Result<Check, ArgumentError> {
    let expected = expected_pairs(args)?;

    Ok(Box::new(move |response: &ResponseSpec| {
        let problems: Vec<String> = expected
            .iter()
            .filter_map(|(name, value)| {
                let actual: Vec<&str> = response.header_values(name).collect();
                match (value, actual.is_empty()) {
                    (None, true) => None,
                    (None, false) => Some(format!(
                        "Header '{name}' should be absent, got '{}'",
                        actual.join(", ")
                    )),
                    (Some(_), true) => Some(format!("Header '{name}' not found")),
                    (Some(want), false) if actual.contains(&want.as_str()) => None,
                    (Some(want), false) => Some(format!(
                        "Header '{name}' value mismatch: expected '{want}', got '{}'",
                        actual.join(", ")
                    )),
                }
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ExpectationFailure::new(problems.join("; ")))
        }
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assertions::tests_support::api_test;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;
    use vouch_domain::Header;

    fn build(expected: Value) -> Check {
        headers_factory(&api_test(), &vec![expected].into()).unwrap()
    }

    fn response(headers: Vec<Header>) -> ResponseSpec {
        ResponseSpec::new(200, headers, "", Duration::ZERO)
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let check = build(json!({"content-type": "application/json", "X-Count": 3}));
        let response = response(vec![
            Header::new("Content-Type", "application/json"),
            Header::new("x-count", "3"),
        ]);
        assert!(check(&response).is_ok());
    }

    #[test]
    fn test_missing_and_mismatched_headers() {
        let check = build(json!({"a": "1", "b": "2"}));
        let response = response(vec![Header::new("b", "3")]);

        let failure = check(&response).unwrap_err();
        assert_eq!(
            failure.message,
            "Header 'a' not found; Header 'b' value mismatch: expected '2', got '3'"
        );
    }

    #[test]
    fn test_null_means_absent() {
        let check = build(json!({"Server": null}));
        assert!(check(&response(vec![])).is_ok());

        let failure = check(&response(vec![Header::new("server", "nginx")])).unwrap_err();
        assert_eq!(failure.message, "Header 'Server' should be absent, got 'nginx'");
    }

    #[test]
    fn test_repeated_header_any_value() {
        let check = build(json!({"Vary": "Origin"}));
        let response = response(vec![
            Header::new("Vary", "Accept"),
            Header::new("Vary", "Origin"),
        ]);
        assert!(check(&response).is_ok());
    }

    #[test]
    fn test_rejects_non_object_arguments() {
        assert!(headers_factory(&api_test(), &vec![json!("a")].into()).is_err());
        assert!(headers_factory(&api_test(), &vec![json!({"a": [1]})].into()).is_err());
    }
}
