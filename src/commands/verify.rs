//! Verify command - run verification for a user

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use mentor_verify::adapters::documents::content_type_for;
use mentor_verify::core::models::{DocumentPayload, IdentityAssertion, VerificationRequest};
use mentor_verify::output::VerifyResult;

use super::{Context, domain_error};

/// Channel inputs gathered from the command line
#[derive(Debug, Default)]
pub struct VerifyInput {
    /// Source-hosting handle
    pub handle: Option<String>,
    /// Document files
    pub documents: Vec<PathBuf>,
    /// Identity-proofing method
    pub identity_method: Option<String>,
    /// Whether the identity step succeeded
    pub identity_verified: bool,
}

/// Run verification for a user
pub async fn verify(ctx: &Context, user_id: &str, input: VerifyInput) -> anyhow::Result<()> {
    let request = build_request(input).await?;
    let orchestrator = ctx.orchestrator()?;
    let record = orchestrator.verify(user_id, request).await.map_err(domain_error)?;
    VerifyResult { record }.render(ctx.mode);
    Ok(())
}

async fn build_request(input: VerifyInput) -> anyhow::Result<VerificationRequest> {
    let documents = if input.documents.is_empty() {
        None
    } else {
        let mut loaded = Vec::with_capacity(input.documents.len());
        for path in &input.documents {
            loaded.push(load_document(path).await?);
        }
        Some(loaded)
    };

    Ok(VerificationRequest {
        source_handle: input.handle,
        documents,
        identity: input.identity_method.map(|method| IdentityAssertion {
            method,
            verified: input.identity_verified,
            detail: serde_json::json!({ "source": "cli" }),
        }),
    })
}

async fn load_document(path: &Path) -> anyhow::Result<DocumentPayload> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let content_type = content_type_for(&name);
    Ok(DocumentPayload::new(name.clone(), name, content_type, content))
}
