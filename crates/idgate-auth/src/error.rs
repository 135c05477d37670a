//! The error taxonomy of a login attempt.
//!
//! Every validation failure aborts the attempt immediately and surfaces
//! verbatim — there is no local recovery, no automatic retry and no cached
//! partial state. Callers restart from scratch. `AlreadyLoggedIn` is the one
//! non-error short-circuit and must be distinguished from genuine step
//! failures.

use idgate_core::ApiError;
use idgate_forms::ParseError;
use idgate_otp::TotpError;
use thiserror::Error;

use crate::login::SessionState;

/// Error type for the login flow.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The very first fetched page already showed the resource-list marker;
    /// the session is authenticated and no further step was taken.
    #[error("The session is already authenticated")]
    AlreadyLoggedIn,

    /// The login page did not match the username step, or the username
    /// check rejected the submitted identifier.
    #[error("The portal did not present the expected username page")]
    InvalidUsernamePage,
    /// The password submission was not acknowledged with a redirect.
    #[error("The portal did not accept the password submission")]
    InvalidPasswordPage,
    /// The method-selection page did not match its marker.
    #[error("The portal did not present the expected method-selection page")]
    InvalidMethodSelectionPage,
    /// The email dispatch did not echo success.
    #[error("The portal did not confirm sending the email one-time password")]
    InvalidEmailSending,
    /// The email one-time-password submission was not acknowledged with a
    /// redirect.
    #[error("The portal did not accept the email one-time password")]
    InvalidEmailOtpPage,
    /// The TOTP submission was not acknowledged with a redirect.
    #[error("The portal did not accept the TOTP code")]
    InvalidTotpPage,
    /// The waiting page did not match its marker.
    #[error("The portal did not present the expected waiting page")]
    InvalidWaitingPage,
    /// The resource-list page did not match its marker.
    #[error("The portal did not present the expected resource-list page")]
    InvalidResourceListPage,

    /// The TOTP branch was selected but the account carries no shared
    /// secret. Detected before any submission round trip.
    #[error("The account has no TOTP shared secret")]
    MissingTotpSecret,

    /// A flow operation was called out of order.
    #[error("`{operation}` is not valid while the flow is in state {state:?}")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The state the flow was in.
        state: SessionState,
    },

    /// A response body or script could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The TOTP secret could not be decoded.
    #[error(transparent)]
    Totp(#[from] TotpError),
    /// A network round trip failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
