//! Rule-based document verifier
//!
//! Checks each uploaded document for size, declared type, a matching file
//! signature and duplicates. Authenticity review beyond that belongs to a
//! dedicated service behind the same port.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::core::models::{DocumentPayload, DocumentResult};
use crate::core::ports::{DocumentCheck, DocumentVerifier, VerifierError};

/// Default maximum document size (10 MiB)
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Default accepted MIME types
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &["application/pdf", "image/png", "image/jpeg"];

/// Document verifier applying local structural rules
#[derive(Debug, Clone)]
pub struct BasicDocumentVerifier {
    max_bytes: usize,
    allowed_types: Vec<String>,
}

impl BasicDocumentVerifier {
    /// Create a verifier with explicit limits
    #[must_use]
    pub fn new(max_bytes: usize, allowed_types: Vec<String>) -> Self {
        Self {
            max_bytes,
            allowed_types: allowed_types.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Check a single document, ignoring duplicates
    #[must_use]
    pub fn check_one(&self, document: &DocumentPayload) -> DocumentResult {
        let content_type = document.content_type.to_lowercase();
        if document.content.is_empty() {
            return DocumentResult::failed(&document.id, "document is empty");
        }
        if document.content.len() > self.max_bytes {
            return DocumentResult::failed(
                &document.id,
                format!("document exceeds {} bytes", self.max_bytes),
            );
        }
        if !self.allowed_types.contains(&content_type) {
            return DocumentResult::failed(
                &document.id,
                format!("unsupported content type {content_type}"),
            );
        }
        if !signature_matches(&content_type, &document.content) {
            return DocumentResult::failed(
                &document.id,
                format!("content does not look like {content_type}"),
            );
        }
        DocumentResult::passed(&document.id)
    }
}

impl Default for BasicDocumentVerifier {
    fn default() -> Self {
        let allowed = DEFAULT_ALLOWED_TYPES.iter().map(ToString::to_string).collect();
        Self::new(DEFAULT_MAX_BYTES, allowed)
    }
}

#[async_trait]
impl DocumentVerifier for BasicDocumentVerifier {
    async fn validate_documents(
        &self,
        documents: &[DocumentPayload],
    ) -> Result<DocumentCheck, VerifierError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut results = Vec::with_capacity(documents.len());

        for document in documents {
            let digest = hex::encode(Sha256::digest(&document.content));
            let result = match seen.get(&digest) {
                Some(first) => {
                    DocumentResult::failed(&document.id, format!("duplicate of document {first}"))
                },
                None => self.check_one(document),
            };
            seen.entry(digest).or_insert(&document.id);
            results.push(result);
        }

        let verified = !results.is_empty() && results.iter().all(|r| r.passed);
        Ok(DocumentCheck { verified, results })
    }
}

fn signature_matches(content_type: &str, content: &[u8]) -> bool {
    match content_type {
        "application/pdf" => content.starts_with(b"%PDF"),
        "image/png" => content.starts_with(b"\x89PNG\r\n\x1a\n"),
        "image/jpeg" => content.starts_with(&[0xFF, 0xD8, 0xFF]),
        // No known signature for other configured types.
        _ => true,
    }
}

/// Guess a MIME type from a file extension
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
