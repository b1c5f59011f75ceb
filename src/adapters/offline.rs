//! Offline source verifier
//!
//! Stands in for the source-hosting verifier when network access is
//! disabled. Every check is reported as an unavailable upstream, so the
//! channel records a retryable failure and other channels still progress.

use async_trait::async_trait;

use crate::core::ports::{SourceCheck, SourceVerifier, VerifierError};

/// Source verifier that never reaches an upstream
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSourceVerifier;

#[async_trait]
impl SourceVerifier for OfflineSourceVerifier {
    async fn verify_profile(&self, _handle: &str) -> Result<SourceCheck, VerifierError> {
        Err(VerifierError::Transient("source verification is offline".to_string()))
    }
}
