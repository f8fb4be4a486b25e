// lti-launch-http/tests/config_validation.rs
// ============================================================================
// Module: Server Configuration Tests
// Description: Tests for TOML loading and fail-closed validation.
// Purpose: Ensure defaults apply and invalid settings are rejected early.
// Dependencies: lti-launch-http
// ============================================================================
//! ## Overview
//! Covers configuration defaults, audit sink selection, and the validation
//! rules that reject empty binds, zero body limits, and empty audit paths.

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

use std::path::PathBuf;

use lti_launch_http::AuditTarget;
use lti_launch_http::ServerConfig;
use lti_launch_http::config::ConfigError;
use lti_launch_http::t;

#[test]
fn empty_document_applies_defaults() {
    let config = ServerConfig::from_toml_str("").unwrap();
    assert_eq!(config.bind, "127.0.0.1:8080");
    assert_eq!(config.max_body_bytes, 1024 * 1024);
    assert!(config.root_account_domain.is_empty());
    assert_eq!(config.audit, AuditTarget::Stderr);
}

#[test]
fn explicit_fields_override_defaults() {
    let raw = r#"
bind = "0.0.0.0:9000"
max_body_bytes = 4096
root_account_domain = "lms.example.edu"

[audit]
target = "file"
path = "/var/log/lti-launch-audit.log"
"#;
    let config = ServerConfig::from_toml_str(raw).unwrap();
    assert_eq!(config.bind, "0.0.0.0:9000");
    assert_eq!(config.max_body_bytes, 4096);
    assert_eq!(config.root_account_domain, "lms.example.edu");
    assert_eq!(
        config.audit,
        AuditTarget::File {
            path: PathBuf::from("/var/log/lti-launch-audit.log"),
        }
    );
}

#[test]
fn noop_audit_target_parses() {
    let raw = "[audit]\ntarget = \"noop\"\n";
    let config = ServerConfig::from_toml_str(raw).unwrap();
    assert_eq!(config.audit, AuditTarget::Noop);
}

#[test]
fn empty_bind_is_rejected() {
    let err = ServerConfig::from_toml_str("bind = \"  \"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn zero_body_limit_is_rejected() {
    let err = ServerConfig::from_toml_str("max_body_bytes = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn empty_audit_file_path_is_rejected() {
    let raw = "[audit]\ntarget = \"file\"\npath = \"\"\n";
    let err = ServerConfig::from_toml_str(raw).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn unknown_audit_target_fails_parsing() {
    let raw = "[audit]\ntarget = \"syslog\"\n";
    let err = ServerConfig::from_toml_str(raw).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn malformed_toml_fails_parsing() {
    let err = ServerConfig::from_toml_str("bind = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn validation_report_failure_has_its_own_message() {
    let message = t!("config.validate.write_failed", error = "stream closed");
    assert_eq!(message, "Failed to report validation result: stream closed");
}
