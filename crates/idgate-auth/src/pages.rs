//! Response validation predicates.
//!
//! The portal serves each page in English or Japanese depending on the
//! session locale, so every page kind is recognized by either of two fixed
//! marker substrings in the body's content region. Submission responses are
//! scripts rather than pages and are checked on the raw body.

use idgate_forms::{extract_fragment, ParseError};

const USERNAME_PAGE_MARKERS: [&str; 2] = [
    "set your e-mail address for password reissue",
    "パスワード再発行用メールアドレスを設定してください",
];

const METHOD_SELECTION_MARKERS: [&str; 2] =
    ["select an authentication method", "認証方法を選択してください"];

const WAITING_PAGE_MARKERS: [&str; 2] = ["wait for a moment", "しばらくお待ちください"];

const RESOURCE_LIST_MARKERS: [&str; 2] = ["Account", "アカウント"];

/// Marker a submission response embeds when the portal answers with a
/// browser redirect script.
const REDIRECT_MARKER: &str = "window.location";

/// Marker the email-dispatch response embeds on success.
const EMAIL_DISPATCH_MARKER: &str = "succeeded";

fn content_region(body: &str) -> Result<String, ParseError> {
    extract_fragment(body, "body")
}

fn matches_any(body: &str, markers: &[&str; 2]) -> Result<bool, ParseError> {
    let region = content_region(body)?;
    Ok(markers.iter().any(|marker| region.contains(marker)))
}

/// Whether `body` is the username step of the login page.
pub fn is_username_page(body: &str) -> Result<bool, ParseError> {
    matches_any(body, &USERNAME_PAGE_MARKERS)
}

/// Whether `body` is the second-factor method-selection page.
pub fn is_method_selection_page(body: &str) -> Result<bool, ParseError> {
    matches_any(body, &METHOD_SELECTION_MARKERS)
}

/// Whether `body` is the transitional waiting page.
pub fn is_waiting_page(body: &str) -> Result<bool, ParseError> {
    matches_any(body, &WAITING_PAGE_MARKERS)
}

/// Whether `body` is the resource-list page that marks an established
/// session.
pub fn is_resource_list_page(body: &str) -> Result<bool, ParseError> {
    matches_any(body, &RESOURCE_LIST_MARKERS)
}

/// Whether the first fetched page already belongs to an authenticated
/// session. Reuses the resource-list markers and must be checked before the
/// username-page predicate.
pub fn already_authenticated(body: &str) -> Result<bool, ParseError> {
    is_resource_list_page(body)
}

/// Whether a submission response acknowledges the step with a browser
/// redirect.
pub fn is_redirect_response(body: &str) -> bool {
    body.contains(REDIRECT_MARKER)
}

/// Whether the email-dispatch response reports success.
pub fn is_email_dispatch_success(body: &str) -> bool {
    body.contains(EMAIL_DISPATCH_MARKER)
}
