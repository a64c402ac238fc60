//! Errors returned by the onboarding API

use thiserror::Error;

/// Failure of an onboarding request
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server refused the form because the user already finished onboarding (403)
    #[error("onboarding already completed")]
    AlreadyOnboarded,

    /// Any other non-success status, with the server's `error` text when it sent one
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request task ended without reporting a result
    #[error("request was interrupted")]
    Interrupted,
}

impl ApiError {
    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
