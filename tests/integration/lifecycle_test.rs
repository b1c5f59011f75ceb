//! End-to-end verification lifecycle through the CLI

use predicates::prelude::*;

use super::Env;

const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

#[test]
fn test_offline_source_then_documents() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "m1"]).assert().success();

    // Source check cannot run offline; the failure is recorded, not raised
    env.cmd()
        .args(["--json", "verify", "m1", "--handle", "octocat"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "pending""#))
        .stdout(predicate::str::contains(r#""source_verified": false"#))
        .stdout(predicate::str::contains("offline"));

    let degree = env.file("degree.pdf", PDF);
    env.cmd()
        .args(["--json", "verify", "m1", "--document"])
        .arg(&degree)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""documents_verified": true"#))
        .stdout(predicate::str::contains(r#""status": "in_review""#))
        .stdout(predicate::str::contains(r#""version": 2"#));

    env.cmd()
        .args(["--json", "status", "m1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""score": 30.0"#));
}

#[test]
fn test_identity_assertion_recorded() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "m1"]).assert().success();

    env.cmd()
        .args(["--json", "verify", "m1", "--handle", "octocat"])
        .args(["--identity-method", "passport", "--identity-verified"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""identity_verified": true"#))
        .stdout(predicate::str::contains(r#""status": "in_review""#));
}

#[test]
fn test_bad_document_fails_channel_only() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "m1"]).assert().success();
    let fake = env.file("fake.pdf", b"just text");

    env.cmd()
        .args(["--json", "verify", "m1", "--handle", "octocat", "--document"])
        .arg(&fake)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""documents_verified": false"#))
        .stdout(predicate::str::contains("does not look like application/pdf"));
}

#[test]
fn test_student_is_refused() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "s1", "--type", "student"]).assert().success();

    env.cmd()
        .args(["verify", "s1", "--handle", "octocat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT_ELIGIBLE"));

    env.cmd()
        .args(["eligibility", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not a mentor"));
}

#[test]
fn test_first_verify_needs_handle() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "m1"]).assert().success();
    let degree = env.file("degree.pdf", PDF);

    env.cmd()
        .args(["verify", "m1", "--document"])
        .arg(&degree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_INPUT"));
}

#[test]
fn test_status_without_record() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "m1"]).assert().success();

    env.cmd()
        .args(["status", "m1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn test_missing_document_file() {
    let env = Env::new();
    env.cmd().args(["profile", "set", "m1"]).assert().success();

    env.cmd()
        .args(["verify", "m1", "--handle", "octocat", "--document", "/no/such/file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read document"));
}
