//! Status code equality.

use vouch_application::{ApiTest, ArgumentError, Check, ExpectArgs};
use vouch_domain::{ExpectationFailure, ResponseSpec, StatusCode};

/// `expectStatus(code)`: the response status equals `code`.
///
/// # Errors
///
/// Returns an error unless the first argument is a status code.
pub fn status_factory(_: &ApiTest, args: &ExpectArgs) -> Result<Check, ArgumentError> {
    let expected = args.status(0)?;

    Ok(Box::new(move |response: &ResponseSpec| {
        if response.status == expected {
            return Ok(());
        }
        Err(ExpectationFailure::mismatch(
            format!(
                "Expected status {}, got {}",
                StatusCode::new(expected),
                response.status_code()
            ),
            expected.to_string(),
            response.status.to_string(),
        ))
    }))
}
