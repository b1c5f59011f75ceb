//! Trust scorer
//!
//! Combines per-channel signals into one score in `[0, 100]`. A channel that
//! was never exercised contributes 0, so a record cannot score high by never
//! attempting a channel.

use serde::Serialize;
use thiserror::Error;

use crate::core::models::VerificationRecord;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Scores are rounded to this many parts per point so that boundary values
/// such as `0.5 * 80 + 0.3 * 100` compare exactly against thresholds
const SCORE_PRECISION: f64 = 10_000.0;

/// Invalid weight table
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightsError {
    /// A weight is negative or not finite
    #[error("weight for {channel} must be a finite non-negative number, got {value}")]
    InvalidWeight {
        /// Channel name
        channel: &'static str,
        /// Offending value
        value: f64,
    },

    /// Weights do not sum to 1
    #[error("weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

/// Per-channel weights; a deployment constant
///
/// Only constructible through [`TrustWeights::new`], so every instance sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrustWeights {
    source: f64,
    documents: f64,
    identity: f64,
}

impl TrustWeights {
    /// Source-hosting weight (`Wg`)
    pub const DEFAULT_SOURCE: f64 = 0.5;
    /// Document weight (`Wd`)
    pub const DEFAULT_DOCUMENTS: f64 = 0.3;
    /// Identity weight (`Wi`)
    pub const DEFAULT_IDENTITY: f64 = 0.2;

    /// Build a weight table, checking that weights are non-negative and sum to 1
    pub fn new(source: f64, documents: f64, identity: f64) -> Result<Self, WeightsError> {
        let named = [("source", source), ("documents", documents), ("identity", identity)];
        for (channel, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidWeight { channel, value });
            }
        }
        let sum = source + documents + identity;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::BadSum(sum));
        }
        Ok(Self {
            source,
            documents,
            identity,
        })
    }

    /// Source-hosting weight
    #[must_use]
    pub const fn source(&self) -> f64 {
        self.source
    }

    /// Document weight
    #[must_use]
    pub const fn documents(&self) -> f64 {
        self.documents
    }

    /// Identity weight
    #[must_use]
    pub const fn identity(&self) -> f64 {
        self.identity
    }
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            source: Self::DEFAULT_SOURCE,
            documents: Self::DEFAULT_DOCUMENTS,
            identity: Self::DEFAULT_IDENTITY,
        }
    }
}

/// Compute the trust score of a record
///
/// Pure: depends only on the record's stored fields and the weight table.
#[must_use]
pub fn score(record: &VerificationRecord, weights: &TrustWeights) -> f64 {
    let documents = if record.documents_channel_verified() { 100.0 } else { 0.0 };
    let identity = if record.identity_verified { 100.0 } else { 0.0 };

    let total = weights.source * record.source_subscore()
        + weights.documents * documents
        + weights.identity * identity;

    ((total * SCORE_PRECISION).round() / SCORE_PRECISION).clamp(0.0, 100.0)
}
