//! Domain models for mentor verification
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`VerificationRecord`] - Per-user verification state
//! - [`VerificationStatus`] - `pending -> in_review -> verified`
//! - [`VerificationRequest`] - Channel inputs for one `verify` call
//! - [`Profile`] - The account being verified
//! - [`Channel`] - Source, documents or identity

mod channel;
mod event;
mod profile;
mod record;
mod report;
mod request;
mod status;

pub use channel::{Channel, ChannelFailure, FailureKind};
pub use event::VerificationEvent;
pub use profile::{Profile, ProfileType};
pub use record::{DocumentResult, SourceEvidence, VerificationRecord};
pub use report::{
    Eligibility, REASON_ALREADY_VERIFIED, REASON_NOT_MENTOR, REASON_PROFILE_NOT_FOUND,
    StatusReport,
};
pub use request::{DocumentPayload, IdentityAssertion, VerificationRequest};
pub use status::VerificationStatus;
