// lti-launch-core/tests/dispatcher.rs
// ============================================================================
// Module: Dispatcher Tests
// Description: Tests for message-type dispatch onto adapter operations.
// Purpose: Ensure payload validation and unsupported-type diagnostics.
// Dependencies: lti-launch-core
// ============================================================================
//! ## Overview
//! Validates that every supported message type yields a payload with a
//! non-empty target link URI and that unsupported types fail with the exact
//! offending identifier.

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

use lti_launch_core::AdapterError;
use lti_launch_core::DispatchError;
use lti_launch_core::LaunchAdapter;
use lti_launch_core::LaunchParams;
use lti_launch_core::MESSAGE_TYPE_CLAIM;
use lti_launch_core::MessageType;
use lti_launch_core::TARGET_LINK_URI_CLAIM;
use lti_launch_core::dispatch;

/// Adapter stub supporting a configurable subset of message types.
struct TestAdapter {
    supported: Vec<MessageType>,
    target_link_uri: Option<String>,
}

impl TestAdapter {
    fn supporting_all() -> Self {
        Self {
            supported: vec![
                MessageType::AssetProcessorSettings,
                MessageType::ReportReview,
                MessageType::Eula,
            ],
            target_link_uri: Some("https://tool.example.com/launch".to_string()),
        }
    }

    fn build(&self, message_type: MessageType) -> Result<LaunchParams, AdapterError> {
        if !self.supported.contains(&message_type) {
            return Err(AdapterError::Unsupported(message_type));
        }
        let mut params = LaunchParams::new();
        params.insert(MESSAGE_TYPE_CLAIM, message_type.as_str());
        if let Some(uri) = &self.target_link_uri {
            params.insert(TARGET_LINK_URI_CLAIM, uri.clone());
        }
        Ok(params)
    }
}

impl LaunchAdapter for TestAdapter {
    fn asset_processor_settings(&self) -> Result<LaunchParams, AdapterError> {
        self.build(MessageType::AssetProcessorSettings)
    }

    fn report_review(&self) -> Result<LaunchParams, AdapterError> {
        self.build(MessageType::ReportReview)
    }

    fn eula(&self) -> Result<LaunchParams, AdapterError> {
        self.build(MessageType::Eula)
    }

    fn launch_url(&self) -> String {
        "https://tool.example.com/launch".to_string()
    }
}

#[test]
fn dispatch_returns_target_link_uri_for_all_supported_types() {
    let adapter = TestAdapter::supporting_all();
    for message_type in
        [MessageType::AssetProcessorSettings, MessageType::ReportReview, MessageType::Eula]
    {
        let params = dispatch(&adapter, message_type).expect("dispatch succeeds");
        let uri = params.target_link_uri().expect("target link uri present");
        assert!(!uri.is_empty());
        assert_eq!(
            params.get(MESSAGE_TYPE_CLAIM).and_then(serde_json::Value::as_str),
            Some(message_type.as_str())
        );
    }
}

#[test]
fn dispatch_reports_unsupported_type_with_exact_identifier() {
    let adapter = TestAdapter {
        supported: vec![MessageType::AssetProcessorSettings],
        target_link_uri: Some("https://tool.example.com/launch".to_string()),
    };
    let error = dispatch(&adapter, MessageType::Eula).expect_err("eula unsupported");
    match error {
        DispatchError::UnsupportedMessageType(raw) => assert_eq!(raw, "LtiEulaRequest"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dispatch_rejects_payload_without_target_link_uri() {
    let adapter = TestAdapter {
        supported: vec![MessageType::ReportReview],
        target_link_uri: None,
    };
    let error = dispatch(&adapter, MessageType::ReportReview).expect_err("missing claim");
    assert!(matches!(error, DispatchError::MissingTargetLinkUri(MessageType::ReportReview)));
}

#[test]
fn dispatch_rejects_empty_target_link_uri() {
    let adapter = TestAdapter {
        supported: vec![MessageType::ReportReview],
        target_link_uri: Some(String::new()),
    };
    let error = dispatch(&adapter, MessageType::ReportReview).expect_err("empty claim");
    assert!(matches!(error, DispatchError::MissingTargetLinkUri(MessageType::ReportReview)));
}

#[test]
fn message_type_parse_round_trips_and_rejects_unknown() {
    for message_type in
        [MessageType::AssetProcessorSettings, MessageType::ReportReview, MessageType::Eula]
    {
        let parsed: MessageType = message_type.as_str().parse().expect("known identifier");
        assert_eq!(parsed, message_type);
    }
    let error = "LtiDeepLinkingRequest".parse::<MessageType>().expect_err("unknown identifier");
    assert_eq!(error.0, "LtiDeepLinkingRequest");
}
