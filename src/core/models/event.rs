//! Verification events
//!
//! Emitted by the orchestrator at each step so runs can be audited.

use super::{Channel, ChannelFailure, VerificationStatus};

/// A step in a verification run
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationEvent {
    /// A verify call passed eligibility and is about to run its channels
    Started {
        /// User being verified
        user_id: String,
        /// Channels supplied by the request
        channels: Vec<Channel>,
    },
    /// A verify call was refused before any channel ran
    Rejected {
        /// User being verified
        user_id: String,
        /// Stable error code
        code: &'static str,
        /// Human-readable reason
        reason: String,
    },
    /// A channel check completed
    ChannelChecked {
        /// User being verified
        user_id: String,
        /// Channel checked
        channel: Channel,
        /// Whether the channel verified
        verified: bool,
    },
    /// A channel check failed and was recorded instead of raised
    ChannelFailed {
        /// User being verified
        user_id: String,
        /// Channel that failed
        channel: Channel,
        /// Recorded failure
        failure: ChannelFailure,
    },
    /// A concurrent write won; the merge is being re-applied
    ConflictRetry {
        /// User being verified
        user_id: String,
        /// Retry number (1-based)
        attempt: u32,
    },
    /// The merged record was written
    Persisted {
        /// User being verified
        user_id: String,
        /// New record version
        version: u64,
        /// Derived score
        score: f64,
        /// Derived status
        status: VerificationStatus,
    },
}

impl VerificationEvent {
    /// User the event concerns
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Started { user_id, .. }
            | Self::Rejected { user_id, .. }
            | Self::ChannelChecked { user_id, .. }
            | Self::ChannelFailed { user_id, .. }
            | Self::ConflictRetry { user_id, .. }
            | Self::Persisted { user_id, .. } => user_id,
        }
    }
}
