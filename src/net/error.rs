//! Error types for collaborator calls.

/// Failure of a single backend request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("backend not configured: {0}")]
    NotConfigured(String),
    #[error("not available outside the browser")]
    Unavailable,
    #[error("network error: {0}")]
    Transport(String),
    #[error("{context} failed ({status}): {message}")]
    Status { context: String, status: u16, message: String },
    #[error("could not decode {context} response: {message}")]
    Decode { context: String, message: String },
}

impl BackendError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the caller's credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("not signed in")]
    SignedOut,
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("checkout unavailable: {0}")]
    Unavailable(String),
    #[error("checkout was closed before payment completed")]
    Dismissed,
    #[error("payment failed: {0}")]
    Failed(String),
    #[error("payment could not be verified: {0}")]
    VerificationRejected(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
