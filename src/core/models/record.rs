//! Verification record model
//!
//! One record per user. It accumulates per-channel results across calls and
//! carries the last derived score and status. The score is always derivable
//! from the stored fields alone.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Channel, ChannelFailure, VerificationStatus};

/// Evidence returned by the source-hosting verifier, stored verbatim for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEvidence {
    /// Normalized sub-score (0-100) computed by the verifier
    pub score: f64,
    /// Raw verifier response
    #[serde(default)]
    pub raw: serde_json::Value,
    /// Failure recorded when the check could not complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ChannelFailure>,
}

impl SourceEvidence {
    /// Evidence for a check that failed before producing a score
    #[must_use]
    pub const fn failed(failure: ChannelFailure) -> Self {
        Self {
            score: 0.0,
            raw: serde_json::Value::Null,
            failure: Some(failure),
        }
    }
}

/// Outcome of checking one submitted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Document identifier or name
    pub id: String,
    /// Whether the document passed
    pub passed: bool,
    /// Reason for the outcome, mostly set on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DocumentResult {
    /// A passing result
    #[must_use]
    pub fn passed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: true,
            reason: None,
        }
    }

    /// A failing result with a reason
    #[must_use]
    pub fn failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Persisted per-user verification state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Stable external identity; immutable once set
    pub user_id: String,

    /// Source-hosting handle supplied by the user
    #[serde(default)]
    pub source_handle: Option<String>,

    /// `None` until the first source check runs
    #[serde(default)]
    pub source_verified: Option<bool>,

    /// Evidence from the last source check
    #[serde(default)]
    pub source_evidence: Option<SourceEvidence>,

    /// True only when every submitted document passed
    #[serde(default)]
    pub documents_verified: bool,

    /// Per-document outcomes from the last successful document check
    #[serde(default)]
    pub document_results: Vec<DocumentResult>,

    /// Last document-channel failure, cleared by a successful check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_failure: Option<ChannelFailure>,

    /// Set by the identity-proofing step
    #[serde(default)]
    pub identity_verified: bool,

    /// Proofing method name -> method-specific detail
    #[serde(default)]
    pub identity_methods: BTreeMap<String, serde_json::Value>,

    /// Derived status
    #[serde(default)]
    pub status: VerificationStatus,

    /// Last derived trust score (0-100)
    #[serde(default)]
    pub score: f64,

    /// Optimistic-concurrency token, incremented on every write
    #[serde(default)]
    pub version: u64,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Create an empty pending record for a user
    #[must_use]
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            source_handle: None,
            source_verified: None,
            source_evidence: None,
            documents_verified: false,
            document_results: Vec::new(),
            document_failure: None,
            identity_verified: false,
            identity_methods: BTreeMap::new(),
            status: VerificationStatus::Pending,
            score: 0.0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the record reached the terminal status
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the source channel is currently verified
    #[must_use]
    pub fn source_channel_verified(&self) -> bool {
        self.source_verified == Some(true)
    }

    /// Whether the document channel is verified
    ///
    /// Enforces the record invariant even if a stored flag disagrees with the
    /// stored results.
    #[must_use]
    pub fn documents_channel_verified(&self) -> bool {
        self.documents_verified
            && !self.document_results.is_empty()
            && self.document_results.iter().all(|r| r.passed)
    }

    /// Channels that are currently verified, in fixed order
    #[must_use]
    pub fn verified_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.source_channel_verified() {
            channels.push(Channel::Source);
        }
        if self.documents_channel_verified() {
            channels.push(Channel::Documents);
        }
        if self.identity_verified {
            channels.push(Channel::Identity);
        }
        channels
    }

    /// Source sub-score as contributed to the trust score
    ///
    /// Zero unless the source channel is verified.
    #[must_use]
    pub fn source_subscore(&self) -> f64 {
        if !self.source_channel_verified() {
            return 0.0;
        }
        self.source_evidence
            .as_ref()
            .map_or(0.0, |e| if e.score.is_finite() { e.score.clamp(0.0, 100.0) } else { 0.0 })
    }
}
