//! Tests for output rendering types

use mentor_verify::core::models::VerificationRecord;
use mentor_verify::output::{OperationResult, OutputMode, VerifyResult};

use crate::common::FixedClock;

#[test]
fn test_output_mode_default_is_human() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn test_verify_result_serializes_record_fields_flat() {
    let record = VerificationRecord::new("m1", FixedClock::epoch().0);
    let json = serde_json::to_value(VerifyResult { record }).unwrap();

    assert_eq!(json["user_id"], "m1");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["version"], 0);
}

#[test]
fn test_operation_result_json() {
    let json = serde_json::to_value(OperationResult::ok("saved")).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "saved");
}
