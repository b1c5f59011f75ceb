//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use super::error::ApiErrorData;
use crate::core::models::{IdentityAssertion, VerificationRecord, VerificationStatus};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for `POST /api/v1/verify`
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    /// Source-hosting handle to check
    #[serde(default)]
    pub source_handle: Option<String>,
    /// Documents to check
    #[serde(default)]
    pub documents: Option<Vec<DocumentUpload>>,
    /// Identity-proofing assertion
    #[serde(default)]
    pub identity: Option<IdentityAssertion>,
}

/// A document carried inline in a verify request
#[derive(Debug, Deserialize)]
pub struct DocumentUpload {
    /// Caller-supplied identifier
    pub id: String,
    /// Original file name
    #[serde(default)]
    pub name: String,
    /// Declared MIME type
    pub content_type: String,
    /// Standard base64 encoding of the file bytes
    pub content_base64: String,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Verify endpoint response data
#[derive(Debug, Serialize)]
pub struct VerifyData {
    /// Status after the run
    pub status: VerificationStatus,
    /// Trust score after the run
    pub score: f64,
    /// Record version written by the run
    pub version: u64,
    /// Full record
    pub record: VerificationRecord,
}

impl From<VerificationRecord> for VerifyData {
    fn from(record: VerificationRecord) -> Self {
        Self {
            status: record.status,
            score: record.score,
            version: record.version,
            record,
        }
    }
}

/// Health endpoint response data
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthData {
    /// Always "ok" while the process serves requests
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

impl Default for HealthData {
    fn default() -> Self {
        Self {
            status: "ok",
            version: crate::VERSION,
        }
    }
}
