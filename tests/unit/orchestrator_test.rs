//! Tests for the verification orchestrator
//!
//! Drives whole `verify` runs against in-memory stores and stub verifiers.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use mentor_verify::core::VerificationError;
use mentor_verify::core::models::{
    Channel, FailureKind, IdentityAssertion, Profile, VerificationEvent, VerificationRequest,
    VerificationStatus,
};
use mentor_verify::core::ports::{ProfileStore, RecordStore, VerifierError};
use mentor_verify::core::services::OrchestratorSettings;

use crate::common::{Harness, MENTOR, RacingStore, STUDENT, pdf, png};

fn handle() -> VerificationRequest {
    VerificationRequest::source("octocat")
}

fn docs() -> VerificationRequest {
    VerificationRequest::documents(vec![pdf("degree"), png("id-card")])
}

// =============================================================================
// HAPPY PATH
// =============================================================================

#[tokio::test]
async fn test_source_only_reaches_in_review() {
    let h = Harness::new();

    let record = h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    assert_eq!(record.source_verified, Some(true));
    assert!(!record.documents_verified);
    assert_eq!(record.score, 40.0);
    assert_eq!(record.status, VerificationStatus::InReview);
    assert_eq!(record.version, 1);
    assert_eq!(h.stored(MENTOR).await.unwrap(), record);
}

#[tokio::test]
async fn test_documents_after_source_reach_verified() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    let record = h.orchestrator.verify(MENTOR, docs()).await.unwrap();

    assert_eq!(record.score, 70.0);
    assert_eq!(record.status, VerificationStatus::Verified);
    assert!(record.documents_verified);
    assert_eq!(record.document_results.len(), 2);
    // Source state from the first call survives the second
    assert_eq!(record.source_handle.as_deref(), Some("octocat"));
    assert_eq!(record.source_verified, Some(true));
    assert_eq!(record.version, 2);
}

#[tokio::test]
async fn test_all_channels_in_one_call() {
    let h = Harness::new();
    let request = handle().with_documents(vec![pdf("degree")]).with_identity(IdentityAssertion {
        method: "passport".to_string(),
        verified: true,
        detail: serde_json::json!({ "country": "NL" }),
    });

    let record = h.orchestrator.verify(MENTOR, request).await.unwrap();

    assert_eq!(record.score, 90.0);
    assert_eq!(record.status, VerificationStatus::Verified);
    assert!(record.identity_verified);
    assert_eq!(record.identity_methods["passport"]["country"], "NL");
}

#[tokio::test]
async fn test_identity_alone_does_not_verify() {
    let h = Harness::new();
    h.source.set_answer(Err(VerifierError::Rejected("not found".into())));
    let request = handle().with_identity(IdentityAssertion {
        method: "video-call".to_string(),
        verified: true,
        detail: serde_json::Value::Null,
    });

    let record = h.orchestrator.verify(MENTOR, request).await.unwrap();

    assert_eq!(record.score, 20.0);
    assert_eq!(record.status, VerificationStatus::InReview);
}

#[tokio::test]
async fn test_profile_back_reference_follows_record() {
    let h = Harness::new();

    assert!(!h.profiles.get(MENTOR).await.unwrap().unwrap().has_verification_record);
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    assert!(h.profiles.get(MENTOR).await.unwrap().unwrap().has_verification_record);
}

// =============================================================================
// REJECTIONS
// =============================================================================

#[tokio::test]
async fn test_student_is_not_eligible() {
    let h = Harness::new();

    let err = h.orchestrator.verify(STUDENT, handle()).await.unwrap_err();

    assert_eq!(err, VerificationError::NotEligible("Profile is not a mentor type".into()));
    assert!(h.stored(STUDENT).await.is_none());
    assert_eq!(h.source.calls(), 0);
}

#[tokio::test]
async fn test_unknown_profile_is_not_eligible() {
    let h = Harness::new();

    let err = h.orchestrator.verify("ghost", handle()).await.unwrap_err();

    assert_eq!(err, VerificationError::NotEligible("Profile not found".into()));
}

#[tokio::test]
async fn test_blank_caller_is_not_authenticated() {
    let h = Harness::new();

    let err = h.orchestrator.verify("   ", handle()).await.unwrap_err();

    assert_eq!(err, VerificationError::NotAuthenticated);
    assert_eq!(err.code(), "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_first_call_needs_a_handle() {
    let h = Harness::new();

    let err = h.orchestrator.verify(MENTOR, docs()).await.unwrap_err();

    assert!(matches!(err, VerificationError::InvalidInput(_)));
    assert!(h.stored(MENTOR).await.is_none());
    assert_eq!(h.documents.calls(), 0);
}

#[tokio::test]
async fn test_empty_request_is_invalid() {
    let h = Harness::new();

    let err = h.orchestrator.verify(MENTOR, VerificationRequest::default()).await.unwrap_err();

    assert!(matches!(err, VerificationError::InvalidInput(_)));
    assert_eq!(
        h.events.count(|e| matches!(e, VerificationEvent::Rejected { code: "INVALID_INPUT", .. })),
        1
    );
}

#[tokio::test]
async fn test_student_with_empty_request_is_not_eligible() {
    let h = Harness::new();

    let err = h.orchestrator.verify(STUDENT, VerificationRequest::default()).await.unwrap_err();

    assert_eq!(err, VerificationError::NotEligible("Profile is not a mentor type".into()));
}

#[tokio::test]
async fn test_verified_record_rejects_any_request() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    h.orchestrator.verify(MENTOR, docs()).await.unwrap();

    let empty = h.orchestrator.verify(MENTOR, VerificationRequest::default()).await;
    let blank = h.orchestrator.verify(MENTOR, VerificationRequest::source("  ")).await;

    assert_eq!(empty.unwrap_err(), VerificationError::AlreadyVerified(MENTOR.into()));
    assert_eq!(blank.unwrap_err(), VerificationError::AlreadyVerified(MENTOR.into()));
}

#[tokio::test]
async fn test_verified_record_is_left_untouched() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    h.orchestrator.verify(MENTOR, docs()).await.unwrap();
    let before = h.stored(MENTOR).await.unwrap();
    let source_calls = h.source.calls();

    let err = h.orchestrator.verify(MENTOR, handle()).await.unwrap_err();

    assert_eq!(err, VerificationError::AlreadyVerified(MENTOR.into()));
    assert_eq!(h.stored(MENTOR).await.unwrap(), before);
    assert_eq!(h.source.calls(), source_calls);
}

// =============================================================================
// CHANNEL FAILURES
// =============================================================================

#[tokio::test]
async fn test_document_outage_keeps_source_result() {
    let h = Harness::new();
    h.documents.set_failure(Some(VerifierError::Transient("503".into())));

    let request = handle().with_documents(vec![pdf("d")]);
    let record = h.orchestrator.verify(MENTOR, request).await.unwrap();

    assert_eq!(record.source_verified, Some(true));
    assert!(!record.documents_verified);
    let failure = record.document_failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::Unavailable);
    assert!(failure.is_retryable());
    assert_eq!(record.status, VerificationStatus::InReview);
}

#[tokio::test]
async fn test_document_outage_keeps_earlier_documents() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    h.documents.reject_id("blurry");
    let blurry = VerificationRequest::documents(vec![pdf("blurry")]);
    h.orchestrator.verify(MENTOR, blurry).await.unwrap();

    h.documents.set_failure(Some(VerifierError::Transient("timeout".into())));
    let record = h.orchestrator.verify(MENTOR, docs()).await.unwrap();

    assert_eq!(record.document_results.len(), 1);
    assert!(!record.document_results[0].passed);
    assert!(record.document_failure.is_some());
}

#[tokio::test]
async fn test_one_failing_document_fails_the_channel() {
    let h = Harness::new();
    h.documents.reject_id("id-card");

    let request = handle().with_documents(docs().documents.unwrap());
    let record = h.orchestrator.verify(MENTOR, request).await.unwrap();

    assert!(!record.documents_verified);
    assert_eq!(record.score, 40.0);
    assert_eq!(record.status, VerificationStatus::InReview);
}

#[tokio::test]
async fn test_source_failure_regresses_status() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    h.source.set_answer(Err(VerifierError::Transient("rate limited".into())));

    let record = h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    assert_eq!(record.source_verified, Some(false));
    let evidence = record.source_evidence.as_ref().unwrap();
    assert_eq!(evidence.failure.as_ref().unwrap().kind, FailureKind::Unavailable);
    assert_eq!(record.score, 0.0);
    assert_eq!(record.status, VerificationStatus::Pending);
}

#[tokio::test]
async fn test_rejected_handle_is_not_retryable() {
    let h = Harness::new();
    h.source.set_answer(Err(VerifierError::Rejected("no such user".into())));

    let record = h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    let failure = record.source_evidence.unwrap().failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Rejected);
    assert!(!failure.is_retryable());
    assert_eq!(record.status, VerificationStatus::Pending);
}

#[tokio::test]
async fn test_slow_verifier_times_out() {
    let settings = OrchestratorSettings {
        verifier_timeout: Duration::from_millis(50),
        ..OrchestratorSettings::default()
    };
    let h = Harness::with_settings(settings);
    h.source.set_delay(Duration::from_secs(5));

    let request = handle().with_documents(vec![pdf("d")]);
    let record = h.orchestrator.verify(MENTOR, request).await.unwrap();

    let failure = record.source_evidence.unwrap().failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Unavailable);
    assert!(failure.reason.contains("timed out"));
    // Documents were not held back by the slow source check
    assert!(record.documents_verified);
    assert_eq!(record.score, 30.0);
}

// =============================================================================
// IDEMPOTENCE AND EVENTS
// =============================================================================

#[tokio::test]
async fn test_repeating_a_request_is_stable() {
    let h = Harness::new();

    let first = h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    let second = h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    assert_eq!(first.score, second.score);
    assert_eq!(first.status, second.status);
    assert_eq!(first.source_handle, second.source_handle);
    assert_eq!(first.source_verified, second.source_verified);
    assert_eq!(first.source_evidence, second.source_evidence);
    assert_eq!(second.version, first.version + 1);
}

#[tokio::test]
async fn test_cancelled_run_releases_user_lock() {
    let h = Harness::new();
    h.source.set_delay(Duration::from_secs(5));

    let cancelled =
        tokio::time::timeout(Duration::from_millis(50), h.orchestrator.verify(MENTOR, handle()))
            .await;

    assert!(cancelled.is_err());
    assert_eq!(h.orchestrator.active_locks(), 0);
    assert!(h.stored(MENTOR).await.is_none());

    h.source.set_delay(Duration::ZERO);
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    assert_eq!(h.orchestrator.active_locks(), 0);
}

#[tokio::test]
async fn test_each_verifier_called_once_per_run() {
    let h = Harness::new();

    h.orchestrator.verify(MENTOR, handle().with_documents(vec![pdf("d")])).await.unwrap();

    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.documents.calls(), 1);
}

#[tokio::test]
async fn test_run_emits_events_in_order() {
    let h = Harness::new();

    h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    let events = h.events.events();
    assert!(matches!(
        &events[0],
        VerificationEvent::Started { channels, .. } if channels == &vec![Channel::Source]
    ));
    assert!(matches!(
        &events[1],
        VerificationEvent::ChannelChecked { channel: Channel::Source, verified: true, .. }
    ));
    assert!(matches!(
        events.last().unwrap(),
        VerificationEvent::Persisted { version: 1, status: VerificationStatus::InReview, .. }
    ));
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_for_one_user_both_land() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    h.source.set_delay(Duration::from_millis(50));

    let (a, b) = tokio::join!(
        h.orchestrator.verify(MENTOR, VerificationRequest::source("hubber")),
        h.orchestrator.verify(MENTOR, docs()),
    );
    a.unwrap();
    b.unwrap();

    let record = h.stored(MENTOR).await.unwrap();
    assert_eq!(record.source_handle.as_deref(), Some("hubber"));
    assert!(record.documents_verified);
    assert_eq!(record.version, 3);
    assert_eq!(record.status, VerificationStatus::Verified);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_users_verify_independently() {
    let h = Harness::new();
    h.profiles.upsert(Profile::mentor("mentor-2"));

    let (a, b) = tokio::join!(
        h.orchestrator.verify(MENTOR, handle()),
        h.orchestrator.verify("mentor-2", handle()),
    );

    assert_eq!(a.unwrap().user_id, MENTOR);
    assert_eq!(b.unwrap().user_id, "mentor-2");
    assert_eq!(h.records.len(), 2);
}

#[tokio::test]
async fn test_lost_race_reapplies_without_reverifying() {
    let mut racing = None;
    let h = Harness::with_store(|records| {
        let store = Arc::new(RacingStore::new(records, 1));
        racing = Some(Arc::clone(&store));
        store as Arc<dyn RecordStore>
    });
    let racing = racing.unwrap();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    let record = h.orchestrator.verify(MENTOR, docs()).await.unwrap();

    // The concurrent identity write and our documents are both kept
    assert!(record.identity_verified);
    assert!(record.documents_verified);
    assert_eq!(record.score, 90.0);
    assert_eq!(record.version, 3);
    assert_eq!(h.documents.calls(), 1);
    assert_eq!(racing.update_attempts.load(Ordering::SeqCst), 2);
    assert_eq!(h.events.count(|e| matches!(e, VerificationEvent::ConflictRetry { .. })), 1);
}

#[tokio::test]
async fn test_retry_rechecks_eligibility() {
    let mut racing = None;
    let h = Harness::with_store(|records| {
        let store = Arc::new(RacingStore::new(records, 1));
        racing = Some(Arc::clone(&store));
        store as Arc<dyn RecordStore>
    });
    let racing = racing.unwrap();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    racing.demote_on_loss(Arc::clone(&h.profiles));

    let err = h.orchestrator.verify(MENTOR, docs()).await.unwrap_err();

    assert_eq!(err, VerificationError::NotEligible("Profile is not a mentor type".into()));
    let stored = h.stored(MENTOR).await.unwrap();
    assert!(!stored.documents_verified);
    assert_eq!(racing.update_attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_exhausted_retries_surface_conflict() {
    let h = Harness::with_store(|records| {
        Arc::new(RacingStore::new(records, usize::MAX)) as Arc<dyn RecordStore>
    });
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    let err = h.orchestrator.verify(MENTOR, docs()).await.unwrap_err();

    assert_eq!(err, VerificationError::Conflict(MENTOR.into()));
    assert_eq!(h.documents.calls(), 1);
    assert_eq!(h.events.count(|e| matches!(e, VerificationEvent::ConflictRetry { .. })), 3);
}

// =============================================================================
// STATUS AND ELIGIBILITY
// =============================================================================

#[tokio::test]
async fn test_status_without_record_is_not_found() {
    let h = Harness::new();

    let err = h.orchestrator.status(MENTOR).await.unwrap_err();

    assert_eq!(err, VerificationError::RecordNotFound(MENTOR.into()));
}

#[tokio::test]
async fn test_status_recomputes_without_calling_verifiers() {
    let h = Harness::new();
    h.orchestrator.verify(MENTOR, handle()).await.unwrap();

    let report = h.orchestrator.status(MENTOR).await.unwrap();

    assert_eq!(report.score, 40.0);
    assert_eq!(report.status, VerificationStatus::InReview);
    assert_eq!(report.source_verified, Some(true));
    assert!(!report.documents_verified);
    assert_eq!(h.source.calls(), 1);
}

#[tokio::test]
async fn test_eligibility_lifecycle() {
    let h = Harness::new();
    assert!(h.orchestrator.eligibility(MENTOR).await.unwrap().eligible);

    h.orchestrator.verify(MENTOR, handle()).await.unwrap();
    assert!(h.orchestrator.eligibility(MENTOR).await.unwrap().eligible);

    h.orchestrator.verify(MENTOR, docs()).await.unwrap();
    let decision = h.orchestrator.eligibility(MENTOR).await.unwrap();
    assert!(!decision.eligible);
    assert_eq!(decision.reason.as_deref(), Some("Already verified"));

    let student = h.orchestrator.eligibility(STUDENT).await.unwrap();
    assert_eq!(student.reason.as_deref(), Some("Profile is not a mentor type"));
}
