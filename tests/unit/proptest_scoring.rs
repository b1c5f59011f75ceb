//! Property-based tests for scoring and status resolution
//!
//! Uses proptest to verify properties that should hold for all records.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use mentor_verify::core::models::{
    DocumentResult, SourceEvidence, VerificationRecord, VerificationStatus,
};
use mentor_verify::core::services::{
    StatusPolicy, TrustWeights, evaluate, hard_gate_met, resolve_status, score,
};

fn arb_record() -> impl Strategy<Value = VerificationRecord> {
    (
        proptest::option::of((any::<bool>(), -50.0f64..200.0)),
        any::<bool>(),
        proptest::collection::vec(any::<bool>(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(source, documents_verified, passes, identity)| {
            let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut record = VerificationRecord::new("u1", now);
            if let Some((verified, subscore)) = source {
                record.source_handle = Some("octocat".to_string());
                record.source_verified = Some(verified);
                record.source_evidence = Some(SourceEvidence {
                    score: subscore,
                    raw: serde_json::Value::Null,
                    failure: None,
                });
            }
            record.documents_verified = documents_verified;
            record.document_results = passes
                .iter()
                .enumerate()
                .map(|(i, passed)| {
                    if *passed {
                        DocumentResult::passed(format!("doc{i}"))
                    } else {
                        DocumentResult::failed(format!("doc{i}"), "rejected")
                    }
                })
                .collect();
            record.identity_verified = identity;
            record
        })
}

proptest! {
    /// Score always lands in [0, 100]
    #[test]
    fn score_is_bounded(record in arb_record()) {
        let value = score(&record, &TrustWeights::default());
        prop_assert!((0.0..=100.0).contains(&value));
    }

    /// Scoring the same record twice gives the same answer
    #[test]
    fn score_is_deterministic(record in arb_record()) {
        let weights = TrustWeights::default();
        prop_assert_eq!(score(&record, &weights).to_bits(), score(&record, &weights).to_bits());
    }

    /// `verified` is never reached without source and documents verified
    #[test]
    fn verified_requires_hard_gate(record in arb_record()) {
        let (_, status) = evaluate(&record, &TrustWeights::default(), &StatusPolicy::default());
        if status == VerificationStatus::Verified {
            prop_assert!(hard_gate_met(&record));
        }
    }

    /// `pending` exactly when no channel is verified
    #[test]
    fn pending_iff_nothing_verified(record in arb_record(), value in 0.0f64..=100.0) {
        let status = resolve_status(value, &record, &StatusPolicy::default());
        let nothing = record.verified_channels().is_empty();
        prop_assert_eq!(status == VerificationStatus::Pending, nothing);
    }

    /// An unverified source contributes nothing, whatever its raw score
    #[test]
    fn unverified_source_scores_zero(subscore in -50.0f64..200.0) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut record = VerificationRecord::new("u1", now);
        record.source_verified = Some(false);
        record.source_evidence = Some(SourceEvidence {
            score: subscore,
            raw: serde_json::Value::Null,
            failure: None,
        });
        prop_assert_eq!(score(&record, &TrustWeights::default()), 0.0);
    }

    /// Weight tables that do not sum to 1 are refused
    #[test]
    fn unbalanced_weights_rejected(a in 0.0f64..1.0, b in 0.0f64..1.0, c in 0.0f64..1.0) {
        prop_assume!((a + b + c - 1.0).abs() > 1e-6);
        prop_assert!(TrustWeights::new(a, b, c).is_err());
    }
}
