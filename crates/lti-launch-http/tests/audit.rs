// lti-launch-http/tests/audit.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: Tests for JSON-line audit sinks.
// Purpose: Ensure file sinks append one parseable record per event.
// Dependencies: lti-launch-core, lti-launch-http, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Writes launch audit records through the file sink and checks that each
//! record lands as one complete JSON line with the expected fields.

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

use std::fs;

use lti_launch_core::ContextId;
use lti_launch_core::LaunchAuditRecord;
use lti_launch_core::LaunchAuditRecordParams;
use lti_launch_core::LaunchAuditSink;
use lti_launch_core::LogLaunchType;
use lti_launch_core::MessageType;
use lti_launch_core::SessionId;
use lti_launch_core::ToolId;
use lti_launch_core::UserId;
use lti_launch_http::FileAuditSink;
use serde_json::Value;

/// Builds a sample audit record for one launch.
fn sample_record(message_type: MessageType) -> LaunchAuditRecord {
    LaunchAuditRecord::new(LaunchAuditRecordParams {
        tool_id: ToolId::from_raw(7).unwrap(),
        context_id: ContextId::from_raw(11).unwrap(),
        user_id: UserId::from_raw(42).unwrap(),
        session_id: Some(SessionId::new("session-abc")),
        launch_type: LogLaunchType::DirectLink,
        launch_url: "https://tool.example.com/lti/eula".to_string(),
        message_type,
    })
}

#[test]
fn file_sink_appends_one_json_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.log");
    let sink = FileAuditSink::new(&path).unwrap();

    sink.record(&sample_record(MessageType::Eula));
    sink.record(&sample_record(MessageType::ReportReview));

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["event"], "lti_launch");
    assert_eq!(first["tool_id"], 7);
    assert_eq!(first["context_id"], 11);
    assert_eq!(first["user_id"], 42);
    assert_eq!(first["session_id"], "session-abc");
    assert_eq!(first["launch_type"], "direct_link");
    assert_eq!(first["message_type"], "LtiEulaRequest");
    assert_eq!(first["launch_url"], "https://tool.example.com/lti/eula");

    let second: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["message_type"], "LtiReportReviewRequest");
}

#[test]
fn file_sink_appends_to_existing_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.log");

    {
        let sink = FileAuditSink::new(&path).unwrap();
        sink.record(&sample_record(MessageType::Eula));
    }
    {
        let sink = FileAuditSink::new(&path).unwrap();
        sink.record(&sample_record(MessageType::AssetProcessorSettings));
    }

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
}
