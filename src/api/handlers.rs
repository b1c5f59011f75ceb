//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`. The caller id is
//! whatever the transport resolved as the authenticated user; `None` means
//! the request carried no identity.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::ApiError;
use super::types::{DocumentUpload, HealthData, VerifyData, VerifyRequest};
use crate::core::models::{DocumentPayload, Eligibility, StatusReport, VerificationRequest};
use crate::core::services::Orchestrator;

// =============================================================================
// VERIFICATION
// =============================================================================

/// Run a verification for the caller
pub async fn verify(
    orchestrator: &Orchestrator,
    caller: Option<&str>,
    req: VerifyRequest,
) -> Result<VerifyData, ApiError> {
    let caller = require_caller(caller)?;
    let request = to_domain(req)?;
    let record = orchestrator.verify(caller, request).await?;
    Ok(VerifyData::from(record))
}

/// Current status for the caller
pub async fn get_status(
    orchestrator: &Orchestrator,
    caller: Option<&str>,
) -> Result<StatusReport, ApiError> {
    let caller = require_caller(caller)?;
    Ok(orchestrator.status(caller).await?)
}

/// Whether the caller may start verification
pub async fn get_eligibility(
    orchestrator: &Orchestrator,
    caller: Option<&str>,
) -> Result<Eligibility, ApiError> {
    let caller = require_caller(caller)?;
    Ok(orchestrator.eligibility(caller).await?)
}

/// Liveness probe
#[must_use]
pub fn health() -> HealthData {
    HealthData::default()
}

// =============================================================================
// HELPERS
// =============================================================================

fn require_caller(caller: Option<&str>) -> Result<&str, ApiError> {
    match caller.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::not_authenticated()),
    }
}

fn to_domain(req: VerifyRequest) -> Result<VerificationRequest, ApiError> {
    let documents = req
        .documents
        .map(|docs| docs.into_iter().map(decode_document).collect::<Result<Vec<_>, _>>())
        .transpose()?;
    Ok(VerificationRequest {
        source_handle: req.source_handle,
        documents,
        identity: req.identity,
    })
}

fn decode_document(upload: DocumentUpload) -> Result<DocumentPayload, ApiError> {
    let content = STANDARD.decode(upload.content_base64.trim()).map_err(|e| {
        ApiError::bad_request(format!("document '{}' is not valid base64: {e}", upload.id))
    })?;
    Ok(DocumentPayload::new(upload.id, upload.name, upload.content_type, content))
}
