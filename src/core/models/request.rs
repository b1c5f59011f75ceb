//! Verification request model
//!
//! A request supplies zero or more channel inputs. Channels not supplied are
//! left untouched on the record.

use serde::{Deserialize, Serialize};

use super::Channel;

/// An uploaded document, validated in-flight and never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    /// Caller-supplied identifier
    pub id: String,
    /// Original file name
    pub name: String,
    /// Declared MIME type
    pub content_type: String,
    /// Raw bytes
    pub content: Vec<u8>,
}

impl DocumentPayload {
    /// Create a document payload
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content_type: content_type.into(),
            content,
        }
    }
}

/// Assertion from an external identity-proofing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityAssertion {
    /// Proofing method name (e.g. "passport", "video-call")
    pub method: String,
    /// Whether the proofing step succeeded
    pub verified: bool,
    /// Method-specific detail, stored verbatim
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Inputs for one `verify` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationRequest {
    /// Source-hosting handle to check
    pub source_handle: Option<String>,
    /// Documents to check
    pub documents: Option<Vec<DocumentPayload>>,
    /// Identity-proofing assertion to record
    pub identity: Option<IdentityAssertion>,
}

impl VerificationRequest {
    /// Request that only checks a source handle
    #[must_use]
    pub fn source(handle: impl Into<String>) -> Self {
        Self {
            source_handle: Some(handle.into()),
            ..Self::default()
        }
    }

    /// Request that only checks documents
    #[must_use]
    pub fn documents(documents: Vec<DocumentPayload>) -> Self {
        Self {
            documents: Some(documents),
            ..Self::default()
        }
    }

    /// Request that only records an identity assertion
    #[must_use]
    pub fn identity(assertion: IdentityAssertion) -> Self {
        Self {
            identity: Some(assertion),
            ..Self::default()
        }
    }

    /// Add a source handle
    #[must_use]
    pub fn with_source_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    /// Add documents
    #[must_use]
    pub fn with_documents(mut self, documents: Vec<DocumentPayload>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Add an identity assertion
    #[must_use]
    pub fn with_identity(mut self, assertion: IdentityAssertion) -> Self {
        self.identity = Some(assertion);
        self
    }

    /// Channels this request supplies inputs for
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.source_handle.is_some() {
            channels.push(Channel::Source);
        }
        if self.documents.is_some() {
            channels.push(Channel::Documents);
        }
        if self.identity.is_some() {
            channels.push(Channel::Identity);
        }
        channels
    }

    /// Check the request is well-formed
    ///
    /// Returns a reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.channels().is_empty() {
            return Err("Request supplies no verification input".to_string());
        }
        if let Some(handle) = &self.source_handle
            && handle.trim().is_empty()
        {
            return Err("Source handle cannot be empty".to_string());
        }
        if let Some(documents) = &self.documents {
            if documents.is_empty() {
                return Err("Document list cannot be empty".to_string());
            }
            if documents.iter().any(|d| d.id.trim().is_empty()) {
                return Err("Every document needs an id".to_string());
            }
        }
        if let Some(identity) = &self.identity
            && identity.method.trim().is_empty()
        {
            return Err("Identity method cannot be empty".to_string());
        }
        Ok(())
    }
}
