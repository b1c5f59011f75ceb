//! Replace-on-supply merge
//!
//! Folds the outcomes of one `verify` call into a record. Channels the call
//! supplied are fully replaced; channels it did not supply are untouched.
//! The merge is pure so it can be re-applied to a freshly loaded record
//! after an optimistic-concurrency conflict without calling verifiers again.

use crate::core::models::{
    ChannelFailure, IdentityAssertion, SourceEvidence, VerificationRecord,
};
use crate::core::ports::{DocumentCheck, SourceCheck};

/// Source channel outcome: the handle checked and what came back
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    /// Handle that was checked
    pub handle: String,
    /// Verifier result, or the failure recorded in its place
    pub result: Result<SourceCheck, ChannelFailure>,
}

/// Everything one `verify` call learned, per supplied channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelOutcomes {
    /// Present when the call supplied a source handle
    pub source: Option<SourceOutcome>,
    /// Present when the call supplied documents
    pub documents: Option<Result<DocumentCheck, ChannelFailure>>,
    /// Present when the call supplied an identity assertion
    pub identity: Option<IdentityAssertion>,
}

/// Apply outcomes to a record
pub fn apply(record: &mut VerificationRecord, outcomes: &ChannelOutcomes) {
    if let Some(source) = &outcomes.source {
        merge_source(record, source);
    }
    if let Some(documents) = &outcomes.documents {
        merge_documents(record, documents);
    }
    if let Some(identity) = &outcomes.identity {
        record.identity_verified = identity.verified;
        record.identity_methods.insert(identity.method.clone(), identity.detail.clone());
    }
}

fn merge_source(record: &mut VerificationRecord, source: &SourceOutcome) {
    record.source_handle = Some(source.handle.clone());
    match &source.result {
        Ok(check) => {
            record.source_verified = Some(check.verified);
            record.source_evidence = Some(SourceEvidence {
                score: check.score,
                raw: check.raw.clone(),
                failure: None,
            });
        },
        Err(failure) => {
            record.source_verified = Some(false);
            record.source_evidence = Some(SourceEvidence::failed(failure.clone()));
        },
    }
}

fn merge_documents(
    record: &mut VerificationRecord,
    documents: &Result<DocumentCheck, ChannelFailure>,
) {
    match documents {
        Ok(check) => {
            record.documents_verified = check.verified
                && !check.results.is_empty()
                && check.results.iter().all(|r| r.passed);
            record.document_results = check.results.clone();
            record.document_failure = None;
        },
        // Prior document state stays as-is; only the failure is noted.
        Err(failure) => record.document_failure = Some(failure.clone()),
    }
}
