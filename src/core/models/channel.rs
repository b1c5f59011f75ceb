//! Verification channels and per-channel failures

use serde::{Deserialize, Serialize};

/// One independent verification signal source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Source-hosting profile (e.g. a GitHub handle)
    Source,
    /// Uploaded credential documents
    Documents,
    /// External identity-proofing step
    Identity,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Documents => write!(f, "documents"),
            Self::Identity => write!(f, "identity"),
        }
    }
}

/// Why a channel check did not produce a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Upstream was unreachable, timed out or rate-limited; retrying may help
    Unavailable,
    /// Upstream answered definitively (e.g. the handle does not exist)
    Rejected,
}

/// A channel-level failure, recorded in the record instead of being raised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFailure {
    /// Failure category
    pub kind: FailureKind,
    /// Human-readable reason
    pub reason: String,
}

impl ChannelFailure {
    /// Upstream unavailable (transient)
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Unavailable,
            reason: reason.into(),
        }
    }

    /// Upstream rejected the input (definitive)
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Rejected,
            reason: reason.into(),
        }
    }

    /// Whether a retry of the same input may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind, FailureKind::Unavailable)
    }
}

impl std::fmt::Display for ChannelFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FailureKind::Unavailable => write!(f, "unavailable: {}", self.reason),
            FailureKind::Rejected => write!(f, "rejected: {}", self.reason),
        }
    }
}
