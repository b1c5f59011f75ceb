//! Eligibility guard
//!
//! Decides whether a user may enter or re-enter verification. Pure: callers
//! load the profile and record and pass them in.
//!
//! Rules, first failure wins:
//! 1. the profile must exist
//! 2. the profile must be a mentor
//! 3. an existing record must not be verified

use crate::core::models::{
    Eligibility, Profile, REASON_ALREADY_VERIFIED, REASON_NOT_MENTOR, REASON_PROFILE_NOT_FOUND,
    VerificationRecord,
};

/// Evaluate eligibility for a profile and its (optional) record
#[must_use]
pub fn check_eligibility(
    profile: Option<&Profile>,
    record: Option<&VerificationRecord>,
) -> Eligibility {
    let Some(profile) = profile else {
        return Eligibility::ineligible(REASON_PROFILE_NOT_FOUND);
    };
    if !profile.is_mentor() {
        return Eligibility::ineligible(REASON_NOT_MENTOR);
    }
    if record.is_some_and(VerificationRecord::is_verified) {
        return Eligibility::ineligible(REASON_ALREADY_VERIFIED);
    }
    Eligibility::eligible()
}
