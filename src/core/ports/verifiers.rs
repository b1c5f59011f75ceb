//! External verifier ports
//!
//! The engine consumes verifiers through these narrow contracts; how a
//! profile is scored or a document assessed is the verifier's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{ChannelFailure, DocumentPayload, DocumentResult};

/// Verifier call failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierError {
    /// Network error, timeout or rate limit; the same input may succeed later
    #[error("upstream unavailable: {0}")]
    Transient(String),

    /// Definitive answer that the input cannot be verified
    #[error("rejected: {0}")]
    Rejected(String),
}

impl From<&VerifierError> for ChannelFailure {
    fn from(err: &VerifierError) -> Self {
        match err {
            VerifierError::Transient(reason) => Self::unavailable(reason.clone()),
            VerifierError::Rejected(reason) => Self::rejected(reason.clone()),
        }
    }
}

/// Result of a source-hosting profile check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCheck {
    /// Whether the profile looks authentic
    pub verified: bool,
    /// Normalized score (0-100)
    pub score: f64,
    /// Raw evidence, stored verbatim
    pub raw: serde_json::Value,
}

/// Result of a document check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCheck {
    /// Aggregate verdict from the verifier
    pub verified: bool,
    /// Per-document outcomes
    pub results: Vec<DocumentResult>,
}

/// Source-hosting profile verifier
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    /// Check a source-hosting handle
    async fn verify_profile(&self, handle: &str) -> Result<SourceCheck, VerifierError>;
}

/// Credential document verifier
#[async_trait]
pub trait DocumentVerifier: Send + Sync {
    /// Check a set of uploaded documents
    async fn validate_documents(
        &self,
        documents: &[DocumentPayload],
    ) -> Result<DocumentCheck, VerifierError>;
}
