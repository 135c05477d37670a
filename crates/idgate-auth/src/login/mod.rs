//! The login state machine.
//!
//! One [`LoginFlow`] drives one attempt. Entry points that used to be free
//! functions in older portal automations are methods on the flow object, so
//! the session state ordering is enforced here instead of by the caller.

mod flow;

pub use flow::{LoginFlow, SessionState};

use idgate_forms::{FormField, MetaToken};

// The portal's standard anti-forgery pair. The passkey branch uses its own
// pair, defined next to the registration code.
pub(crate) const PAGE_TOKEN_FIELD: &str = "csrf-token";
pub(crate) const PAGE_TOKEN_HEADER: &str = "X-CSRF-Token";

// Form regions the flow extracts from full pages before reading inputs.
pub(crate) const IDENTIFIER_REGION_SELECTOR: &str = "#identifier-field";
pub(crate) const LOGIN_FORM_SELECTOR: &str = "#login-form";
pub(crate) const EMAIL_OTP_FORM_SELECTOR: &str = "#email-otp-form";
pub(crate) const TOTP_FORM_SELECTOR: &str = "#totp-form";

/// The intermediate the email branch hands back to the caller.
///
/// The portal has dispatched the one-time password; once the user has read
/// it from their inbox, pass this value back together with the digits to
/// [`LoginFlow::submit_email_otp`].
#[derive(Debug, Clone)]
pub struct EmailChallenge {
    /// The extracted email-OTP form fields, still unfilled.
    pub fields: Vec<FormField>,
    /// The page tokens the completion submission must echo.
    pub tokens: Vec<MetaToken>,
}
