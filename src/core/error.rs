//! Verification error taxonomy
//!
//! Structural failures that propagate to the caller. Channel-level failures
//! never appear here: they are recorded on the record as a
//! [`ChannelFailure`](super::models::ChannelFailure).

use thiserror::Error;

use super::ports::StoreError;

/// Errors surfaced by the verification engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// No resolvable caller identity
    #[error("caller identity could not be resolved")]
    NotAuthenticated,

    /// A business rule blocks the attempt
    #[error("not eligible: {0}")]
    NotEligible(String),

    /// Malformed or insufficient request
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The record is terminal and accepts no further writes
    #[error("user {0} is already verified")]
    AlreadyVerified(String),

    /// Concurrent writers kept winning; retries exhausted
    #[error("concurrent update conflict for user {0}")]
    Conflict(String),

    /// No verification record exists for the user
    #[error("no verification record for user {0}")]
    RecordNotFound(String),

    /// The record or profile store failed
    #[error("store error: {0}")]
    Store(String),
}

impl VerificationError {
    /// Stable machine-readable code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotEligible(_) => "NOT_ELIGIBLE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::AlreadyVerified(_) => "ALREADY_VERIFIED",
            Self::Conflict(_) => "CONFLICT",
            Self::RecordNotFound(_) => "NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for VerificationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(user) | StoreError::VersionConflict { user, .. } => {
                Self::Conflict(user)
            },
            StoreError::NotFound(user) => Self::RecordNotFound(user),
            StoreError::Backend(message) => Self::Store(message),
        }
    }
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, VerificationError>;
