//! Errors that can occur when talking to the portal

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from performing network requests.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error("Received error message from server: [{}] {}", .status, .message)]
    ResponseContent { status: StatusCode, message: String },
}

impl ApiError {
    /// Returns the HTTP status when the server answered with a non-success
    /// status, `None` for client-side failures.
    pub fn response_status(&self) -> Option<StatusCode> {
        match self {
            ApiError::ResponseContent { status, .. } => Some(*status),
            _ => None,
        }
    }
}
