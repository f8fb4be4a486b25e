// lti-launch-core/tests/orchestrator.rs
// ============================================================================
// Module: Orchestrator Tests
// Description: Tests for launch construction, dispatch, and audit emission.
// Purpose: Ensure exactly one audit record per successful launch.
// Dependencies: lti-launch-core
// ============================================================================
//! ## Overview
//! Validates the orchestrator contract: audit-record count equals the number
//! of successful launches, the launch resource URL and parameters come from
//! one adapter invocation, and option merging prefers caller overrides.

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

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use lti_launch_core::AdapterError;
use lti_launch_core::AdapterOptions;
use lti_launch_core::AdapterRequest;
use lti_launch_core::Context;
use lti_launch_core::ContextId;
use lti_launch_core::ContextKind;
use lti_launch_core::ExpansionContext;
use lti_launch_core::LaunchAdapter;
use lti_launch_core::LaunchAdapterFactory;
use lti_launch_core::LaunchAuditRecord;
use lti_launch_core::LaunchAuditSink;
use lti_launch_core::LaunchOrchestrator;
use lti_launch_core::LaunchParams;
use lti_launch_core::LaunchRequest;
use lti_launch_core::LogLaunchType;
use lti_launch_core::MessageType;
use lti_launch_core::RootAccount;
use lti_launch_core::TARGET_LINK_URI_CLAIM;
use lti_launch_core::Tool;
use lti_launch_core::ToolId;
use lti_launch_core::User;
use lti_launch_core::UserId;
use lti_launch_core::VariableExpander;

/// Expander stub that performs no substitution.
struct NoopExpander;

impl VariableExpander for NoopExpander {
    fn expand(&self, _expansion: &ExpansionContext, _params: &mut LaunchParams) {}
}

/// Audit sink capturing records for assertions.
#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<LaunchAuditRecord>>,
}

impl LaunchAuditSink for RecordingSink {
    fn record(&self, record: &LaunchAuditRecord) {
        self.records.lock().expect("sink lock").push(record.clone());
    }
}

/// Adapter stub controlled by the factory configuration.
struct StubAdapter {
    supported: bool,
    launch_url: String,
}

impl StubAdapter {
    fn build(&self, message_type: MessageType) -> Result<LaunchParams, AdapterError> {
        if !self.supported {
            return Err(AdapterError::Unsupported(message_type));
        }
        let mut params = LaunchParams::new();
        params.insert(TARGET_LINK_URI_CLAIM, self.launch_url.clone());
        Ok(params)
    }
}

impl LaunchAdapter for StubAdapter {
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
        self.launch_url.clone()
    }
}

/// Factory recording the last adapter request it received.
#[derive(Default)]
struct RecordingFactory {
    supported: bool,
    last_request: Mutex<Option<AdapterRequest>>,
}

impl LaunchAdapterFactory for RecordingFactory {
    fn adapter(
        &self,
        request: AdapterRequest,
        _expander: Arc<dyn VariableExpander>,
        _expansion: ExpansionContext,
    ) -> Box<dyn LaunchAdapter> {
        let launch_url = format!("{}/launch", request.tool.url);
        *self.last_request.lock().expect("factory lock") = Some(request);
        Box::new(StubAdapter {
            supported: self.supported,
            launch_url,
        })
    }
}

fn sample_request(message_type: MessageType) -> LaunchRequest {
    LaunchRequest {
        tool: Tool {
            id: ToolId::from_raw(7).expect("tool id"),
            label: "Essay Review".to_string(),
            domain: Some("tool.example.com".to_string()),
            url: "https://tool.example.com".to_string(),
        },
        context: Context {
            id: ContextId::from_raw(11).expect("context id"),
            kind: ContextKind::Course,
            title: "Composition 101".to_string(),
        },
        user: User {
            id: UserId::from_raw(42).expect("user id"),
            name: "Rosa Teacher".to_string(),
            pseudonym: Some("rosa".to_string()),
        },
        root_account: RootAccount {
            domain: "lms.example.edu".to_string(),
        },
        request_host: "lms-shard-2.example.edu".to_string(),
        session_id: Some("session-abc".into()),
        message_type,
        return_url: "https://lms.example.edu/return".to_string(),
        adapter_overrides: AdapterOptions::default(),
        expander_overrides: BTreeMap::new(),
        log_launch_type: LogLaunchType::DirectLink,
    }
}

fn orchestrator(
    factory: Arc<RecordingFactory>,
    sink: Arc<RecordingSink>,
) -> LaunchOrchestrator {
    LaunchOrchestrator::new(factory, Arc::new(NoopExpander), sink)
}

#[test]
fn successful_launch_emits_exactly_one_audit_record() {
    let factory = Arc::new(RecordingFactory {
        supported: true,
        ..RecordingFactory::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let orchestrator = orchestrator(Arc::clone(&factory), Arc::clone(&sink));

    let launch = orchestrator
        .create_and_log_launch(sample_request(MessageType::ReportReview))
        .expect("launch succeeds");

    let records = sink.records.lock().expect("sink lock");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.message_type, MessageType::ReportReview);
    assert_eq!(record.launch_type, LogLaunchType::DirectLink);
    assert_eq!(record.launch_url, "https://tool.example.com/launch");
    assert_eq!(record.user_id.get(), 42);
    assert_eq!(record.tool_id.get(), 7);
    assert_eq!(record.context_id.get(), 11);

    assert_eq!(launch.link_text, "Essay Review");
    assert_eq!(launch.analytics_id, "tool.example.com");
    assert_eq!(launch.resource_url.as_deref(), Some("https://tool.example.com/launch"));
    assert_eq!(launch.params.target_link_uri(), Some("https://tool.example.com/launch"));
}

#[test]
fn failed_dispatch_emits_no_audit_record() {
    let factory = Arc::new(RecordingFactory {
        supported: false,
        ..RecordingFactory::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let orchestrator = orchestrator(factory, Arc::clone(&sink));

    let result = orchestrator.create_and_log_launch(sample_request(MessageType::Eula));
    assert!(result.is_err());
    assert!(sink.records.lock().expect("sink lock").is_empty());
}

#[test]
fn audit_record_count_matches_success_count() {
    let factory = Arc::new(RecordingFactory {
        supported: true,
        ..RecordingFactory::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let orchestrator = orchestrator(factory, Arc::clone(&sink));

    for _ in 0..3 {
        orchestrator
            .create_and_log_launch(sample_request(MessageType::AssetProcessorSettings))
            .expect("launch succeeds");
    }
    assert_eq!(sink.records.lock().expect("sink lock").len(), 3);
}

#[test]
fn adapter_options_default_domain_comes_from_root_account() {
    let factory = Arc::new(RecordingFactory {
        supported: true,
        ..RecordingFactory::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let orchestrator = orchestrator(Arc::clone(&factory), sink);

    orchestrator
        .create_and_log_launch(sample_request(MessageType::ReportReview))
        .expect("launch succeeds");

    let request = factory.last_request.lock().expect("factory lock").clone().expect("request");
    assert_eq!(request.options.domain.as_deref(), Some("lms.example.edu"));
}

#[test]
fn adapter_option_overrides_win_over_defaults() {
    let factory = Arc::new(RecordingFactory {
        supported: true,
        ..RecordingFactory::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let orchestrator = orchestrator(Arc::clone(&factory), sink);

    let mut request = sample_request(MessageType::ReportReview);
    request.adapter_overrides = AdapterOptions {
        domain: Some("override.example.com".to_string()),
        extra_claims: BTreeMap::from([(
            "https://tool.example.com/claim/theme".to_string(),
            serde_json::Value::String("dark".to_string()),
        )]),
    };
    orchestrator.create_and_log_launch(request).expect("launch succeeds");

    let recorded = factory.last_request.lock().expect("factory lock").clone().expect("request");
    assert_eq!(recorded.options.domain.as_deref(), Some("override.example.com"));
    assert!(recorded.options.extra_claims.contains_key("https://tool.example.com/claim/theme"));
}
