//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (stores, upstream verifiers, logging, time).
//!
//! Implementations live in the `adapters` module.

mod event_log;
mod profile_store;
mod record_store;
mod verifiers;

pub use event_log::{Clock, EventLog};
pub use profile_store::ProfileStore;
pub use record_store::{RecordStore, StoreError};
pub use verifiers::{DocumentCheck, DocumentVerifier, SourceCheck, SourceVerifier, VerifierError};
