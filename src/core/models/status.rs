//! Verification status
//!
//! The three-state machine the rest of the product reads:
//! `pending -> in_review -> verified`, with `verified` terminal.

use serde::{Deserialize, Serialize};

/// Status of a mentor verification record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No channel verified yet (or record newly created)
    #[default]
    Pending,
    /// At least one channel verified, terminal gate not met
    InReview,
    /// Terminal: the record accepts no further verification writes
    Verified,
}

impl VerificationStatus {
    /// Whether this status is terminal
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Stable string form, as stored and reported
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Verified => "verified",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_review" | "in-review" => Ok(Self::InReview),
            "verified" => Ok(Self::Verified),
            _ => Err(format!("Invalid status: {s}. Use: pending, in_review, verified")),
        }
    }
}
