//! Profile model
//!
//! Profiles are owned by the wider product; verification only reads them.

use serde::{Deserialize, Serialize};

/// Declared account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// May enter verification
    Mentor,
    /// Never eligible for mentor verification
    Student,
}

impl std::fmt::Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mentor => write!(f, "mentor"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl std::str::FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mentor" => Ok(Self::Mentor),
            "student" => Ok(Self::Student),
            _ => Err(format!("Invalid profile type: {s}. Use: mentor, student")),
        }
    }
}

/// A user profile as seen by verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable user identifier
    pub user_id: String,
    /// Declared type
    #[serde(rename = "type")]
    pub profile_type: ProfileType,
    /// Whether a verification record exists for this profile
    #[serde(default)]
    pub has_verification_record: bool,
}

impl Profile {
    /// Create a profile without a verification record
    #[must_use]
    pub fn new(user_id: impl Into<String>, profile_type: ProfileType) -> Self {
        Self {
            user_id: user_id.into(),
            profile_type,
            has_verification_record: false,
        }
    }

    /// Shorthand for a mentor profile
    #[must_use]
    pub fn mentor(user_id: impl Into<String>) -> Self {
        Self::new(user_id, ProfileType::Mentor)
    }

    /// Whether this profile declares the mentor type
    #[must_use]
    pub const fn is_mentor(&self) -> bool {
        matches!(self.profile_type, ProfileType::Mentor)
    }
}
