//! Read-side views: eligibility decisions and status reports

use serde::{Deserialize, Serialize};

use super::VerificationStatus;

/// Reason reported when no profile exists for the user
pub const REASON_PROFILE_NOT_FOUND: &str = "Profile not found";
/// Reason reported when the profile is not a mentor
pub const REASON_NOT_MENTOR: &str = "Profile is not a mentor type";
/// Reason reported when the record is already verified
pub const REASON_ALREADY_VERIFIED: &str = "Already verified";

/// Whether a user may enter (or re-enter) verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Whether verification may proceed
    pub eligible: bool,
    /// Why not, when ineligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Eligibility {
    /// An eligible decision
    #[must_use]
    pub const fn eligible() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    /// An ineligible decision with a reason
    #[must_use]
    pub fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            reason: Some(reason.into()),
        }
    }
}

/// Status view recomputed from a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// User the report is for
    pub user_id: String,
    /// `None` until the first source check ran
    pub source_verified: Option<bool>,
    /// Document channel verified
    pub documents_verified: bool,
    /// Identity channel verified
    pub identity_verified: bool,
    /// Derived status
    pub status: VerificationStatus,
    /// Trust score (0-100)
    pub score: f64,
}
