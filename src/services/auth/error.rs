use reqwest::StatusCode;
use thiserror::Error;

/// Why a token could not be resolved to an identity.
///
/// Only `Unauthorized` is the caller's fault; every other kind is an upstream
/// problem and is reported to clients as a plain 500.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected identity provider response: {status}")]
    Provider { status: StatusCode },

    #[error("identity provider request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed identity provider response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl ValidationError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
