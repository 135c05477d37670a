use thiserror::Error;

/// Errors from turning a response body into the typed descriptors the flow
/// consumes.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A selector failed to compile. Selectors are fixed at build time, so
    /// hitting this means a programming error rather than portal drift.
    #[error("Invalid selector `{selector}`: {message}")]
    Selector {
        /// The selector source text.
        selector: String,
        /// The engine's description of the failure.
        message: String,
    },
    /// A response expected to carry a quoted redirect URL did not.
    #[error("Redirect script did not contain a second quoted segment")]
    MalformedRedirectScript,
}
