//! Status resolver
//!
//! Maps a score plus hard gates to a [`VerificationStatus`]. Rules, in order:
//!
//! 1. `verified` when the source and document channels are both verified
//!    (hard gate) and the score reaches the verified threshold
//! 2. `in_review` when at least one channel is verified
//! 3. `pending` otherwise
//!
//! The resolver does not look at the previous status; a re-check that
//! disproves a channel moves an `in_review` record back to `pending`.
//! Terminal records are never re-resolved by the orchestrator.

use serde::{Deserialize, Serialize};

use super::scorer::{TrustWeights, score};
use crate::core::models::{VerificationRecord, VerificationStatus};

/// Thresholds for the status state machine; a deployment constant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPolicy {
    /// Minimum score for `verified` (the hard gate must also hold)
    pub verified_threshold: f64,
}

impl StatusPolicy {
    /// Default verified threshold: a verified source with sub-score 80 plus
    /// verified documents lands exactly on it
    pub const DEFAULT_VERIFIED_THRESHOLD: f64 = 70.0;
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            verified_threshold: Self::DEFAULT_VERIFIED_THRESHOLD,
        }
    }
}

/// Whether the non-score gate for `verified` holds
#[must_use]
pub fn hard_gate_met(record: &VerificationRecord) -> bool {
    record.source_channel_verified() && record.documents_channel_verified()
}

/// Resolve the status for a score and record
#[must_use]
pub fn resolve_status(
    score: f64,
    record: &VerificationRecord,
    policy: &StatusPolicy,
) -> VerificationStatus {
    if hard_gate_met(record) && score >= policy.verified_threshold {
        VerificationStatus::Verified
    } else if !record.verified_channels().is_empty() {
        VerificationStatus::InReview
    } else {
        VerificationStatus::Pending
    }
}

/// Score a record and resolve its status in one step
#[must_use]
pub fn evaluate(
    record: &VerificationRecord,
    weights: &TrustWeights,
    policy: &StatusPolicy,
) -> (f64, VerificationStatus) {
    let value = score(record, weights);
    (value, resolve_status(value, record, policy))
}
