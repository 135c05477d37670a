//! Redirect-URL extraction from inline-script responses.

use crate::error::ParseError;

/// Pulls the redirect URL out of a script payload.
///
/// Successful submission steps answer with a small script whose second
/// double-quoted segment is the URL the browser would be sent to. Splitting
/// on `"` puts that segment at index 3. Upstream validation has already
/// checked the redirect marker, so anything shorter is a broken contract and
/// surfaces as [`ParseError::MalformedRedirectScript`].
pub fn redirect_url(script: &str) -> Result<String, ParseError> {
    script
        .split('"')
        .nth(3)
        .map(str::to_string)
        .ok_or(ParseError::MalformedRedirectScript)
}
