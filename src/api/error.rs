//! API error types with HTTP status code mapping

use serde::Serialize;

use crate::core::VerificationError;

/// Error codes that map to HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Caller identity missing (401)
    NotAuthenticated,
    /// Profile may not enter verification (403)
    NotEligible,
    /// Malformed request (400)
    BadRequest,
    /// Request failed domain validation (400)
    InvalidInput,
    /// Resource not found (404)
    NotFound,
    /// Record is already verified (409)
    AlreadyVerified,
    /// Concurrent update could not be reconciled (409)
    Conflict,
    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotAuthenticated => 401,
            Self::NotEligible => 403,
            Self::BadRequest | Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::AlreadyVerified | Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Get the error code string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// API error with code and message
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error code (determines HTTP status)
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create an error with an explicit code
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Caller did not identify itself
    #[must_use]
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated, "Caller identity is required")
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a bad request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        let code = match &err {
            VerificationError::NotAuthenticated => ErrorCode::NotAuthenticated,
            VerificationError::NotEligible(_) => ErrorCode::NotEligible,
            VerificationError::InvalidInput(_) => ErrorCode::InvalidInput,
            VerificationError::AlreadyVerified(_) => ErrorCode::AlreadyVerified,
            VerificationError::Conflict(_) => ErrorCode::Conflict,
            VerificationError::RecordNotFound(_) => ErrorCode::NotFound,
            VerificationError::Store(_) => ErrorCode::Internal,
        };
        Self::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Serializable error data for JSON responses
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// Error code string
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
