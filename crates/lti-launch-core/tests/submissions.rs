// lti-launch-core/tests/submissions.rs
// ============================================================================
// Module: Submission Resolution Tests
// Description: Tests for student selectors and attempt resolution policy.
// Purpose: Ensure permissive attempt parsing and prefix-based selectors.
// Dependencies: lti-launch-core
// ============================================================================
//! ## Overview
//! Validates the permissive submission resolution policy: raw numeric and
//! `anonymous:` prefixed student ids, and attempt selection that falls back
//! to the latest version rather than erroring.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use lti_launch_core::AnonymousId;
use lti_launch_core::AssignmentId;
use lti_launch_core::AttemptSelector;
use lti_launch_core::StudentSelector;
use lti_launch_core::Submission;
use lti_launch_core::SubmissionId;
use lti_launch_core::SubmissionVersion;
use lti_launch_core::UserId;

fn sample_submission() -> Submission {
    Submission {
        id: SubmissionId::from_raw(100).expect("submission id"),
        assignment_id: AssignmentId::from_raw(5).expect("assignment id"),
        user_id: UserId::from_raw(42).expect("user id"),
        anonymous_id: Some(AnonymousId::new("abc123")),
        group_id: None,
        versions: vec![
            SubmissionVersion {
                attempt: 1,
                body_ref: "v1".to_string(),
            },
            SubmissionVersion {
                attempt: 2,
                body_ref: "v2".to_string(),
            },
            SubmissionVersion {
                attempt: 3,
                body_ref: "v3".to_string(),
            },
        ],
    }
}

#[test]
fn numeric_student_id_resolves_to_user_id() {
    let selector: StudentSelector = "42".parse().expect("numeric selector");
    assert_eq!(selector, StudentSelector::UserId(UserId::from_raw(42).expect("user id")));
}

#[test]
fn prefixed_student_id_resolves_to_anonymous_id() {
    let selector: StudentSelector = "anonymous:abc123".parse().expect("anonymous selector");
    assert_eq!(selector, StudentSelector::Anonymous(AnonymousId::new("abc123")));
}

#[test]
fn malformed_student_ids_are_rejected() {
    assert!("".parse::<StudentSelector>().is_err());
    assert!("abc".parse::<StudentSelector>().is_err());
    assert!("anonymous:".parse::<StudentSelector>().is_err());
    assert!("0".parse::<StudentSelector>().is_err());
}

#[test]
fn absent_and_invalid_attempts_select_latest() {
    assert_eq!(AttemptSelector::parse(None), AttemptSelector::Latest);
    assert_eq!(AttemptSelector::parse(Some("0")), AttemptSelector::Latest);
    assert_eq!(AttemptSelector::parse(Some("-2")), AttemptSelector::Latest);
    assert_eq!(AttemptSelector::parse(Some("latest")), AttemptSelector::Latest);
    assert_eq!(AttemptSelector::parse(Some("")), AttemptSelector::Latest);
}

#[test]
fn positive_attempt_selects_matching_version() {
    let submission = sample_submission();
    let selector = AttemptSelector::parse(Some("3"));
    assert_eq!(selector, AttemptSelector::Attempt(3));
    let version = submission.select_version(selector).expect("version");
    assert_eq!(version.body_ref, "v3");

    let version = submission
        .select_version(AttemptSelector::parse(Some("2")))
        .expect("version");
    assert_eq!(version.body_ref, "v2");
}

#[test]
fn unmatched_attempt_falls_back_to_latest() {
    let submission = sample_submission();
    let version = submission
        .select_version(AttemptSelector::parse(Some("9")))
        .expect("version");
    assert_eq!(version.body_ref, "v3");
}

#[test]
fn latest_selector_returns_newest_version() {
    let submission = sample_submission();
    let version = submission.select_version(AttemptSelector::Latest).expect("version");
    assert_eq!(version.attempt, 3);
}
