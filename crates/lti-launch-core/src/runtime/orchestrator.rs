// lti-launch-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Launch Orchestrator
// Description: Launch construction, dispatch, and audit emission.
// Purpose: Produce a rendered-ready Launch with exactly one audit record.
// Dependencies: crate::{core, interfaces, runtime::dispatcher}
// ============================================================================

//! ## Overview
//! The orchestrator builds a [`Launch`] from tool-derived display metadata,
//! constructs the adapter and expander inputs, dispatches the message type,
//! and emits the audit record. The audit record is written exactly once per
//! successful call and never when dispatch fails. The launch's resource URL
//! and parameters always come from the same adapter invocation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::Context;
use crate::core::Launch;
use crate::core::LogLaunchType;
use crate::core::MessageType;
use crate::core::RootAccount;
use crate::core::SessionId;
use crate::core::Tool;
use crate::core::User;
use crate::core::launch::LaunchAuditRecord;
use crate::core::launch::LaunchAuditRecordParams;
use crate::interfaces::AdapterOptions;
use crate::interfaces::AdapterRequest;
use crate::interfaces::ExpansionContext;
use crate::interfaces::LaunchAdapterFactory;
use crate::interfaces::LaunchAuditSink;
use crate::interfaces::VariableExpander;
use crate::runtime::dispatcher::DispatchError;
use crate::runtime::dispatcher::dispatch;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Inputs required to orchestrate one launch.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Tool being launched.
    pub tool: Tool,
    /// Launch context.
    pub context: Context,
    /// Acting user.
    pub user: User,
    /// Root account for instance-wide defaults.
    pub root_account: RootAccount,
    /// Host name of the incoming request.
    pub request_host: String,
    /// Session identifier when available.
    pub session_id: Option<SessionId>,
    /// Message type to dispatch.
    pub message_type: MessageType,
    /// Return URL handed to the adapter.
    pub return_url: String,
    /// Caller overrides merged into the default adapter options.
    pub adapter_overrides: AdapterOptions,
    /// Caller overrides merged into the expander entries.
    pub expander_overrides: BTreeMap<String, String>,
    /// Launch type label for the audit record.
    pub log_launch_type: LogLaunchType,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Dispatch failed; no audit record was emitted.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Launch orchestrator wiring the adapter factory, expander, and audit sink.
pub struct LaunchOrchestrator {
    /// Adapter factory; one adapter is built per request.
    factory: Arc<dyn LaunchAdapterFactory>,
    /// Variable expander handed to each adapter.
    expander: Arc<dyn VariableExpander>,
    /// Audit sink receiving exactly one record per successful launch.
    audit: Arc<dyn LaunchAuditSink>,
}

impl LaunchOrchestrator {
    /// Creates a new orchestrator.
    #[must_use]
    pub fn new(
        factory: Arc<dyn LaunchAdapterFactory>,
        expander: Arc<dyn VariableExpander>,
        audit: Arc<dyn LaunchAuditSink>,
    ) -> Self {
        Self {
            factory,
            expander,
            audit,
        }
    }

    /// Builds, dispatches, and audits one launch.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError`] when dispatch fails; no audit record
    /// is emitted in that case.
    pub fn create_and_log_launch(
        &self,
        request: LaunchRequest,
    ) -> Result<Launch, OrchestrationError> {
        let mut launch = Launch::new(request.tool.label.clone(), request.tool.analytics_id());

        let defaults = AdapterOptions {
            domain: Some(default_domain(&request.root_account, &request.request_host)),
            extra_claims: BTreeMap::new(),
        };
        let options = defaults.merged_with(request.adapter_overrides.clone());

        let expansion = ExpansionContext {
            root_account: request.root_account.clone(),
            context: request.context.clone(),
            user: request.user.clone(),
            tool: request.tool.clone(),
            session_id: request.session_id.clone(),
            link_text: Some(launch.link_text.clone()),
            overrides: request.expander_overrides.clone(),
        };

        let adapter = self.factory.adapter(
            AdapterRequest {
                tool: request.tool.clone(),
                user: request.user.clone(),
                context: request.context.clone(),
                return_url: request.return_url.clone(),
                options,
            },
            Arc::clone(&self.expander),
            expansion,
        );

        let params = dispatch(adapter.as_ref(), request.message_type)?;
        let launch_url =
            params.target_link_uri().map_or_else(|| adapter.launch_url(), str::to_string);
        launch.resource_url = Some(adapter.launch_url());
        launch.params = params;

        self.audit.record(&LaunchAuditRecord::new(LaunchAuditRecordParams {
            tool_id: request.tool.id,
            context_id: request.context.id,
            user_id: request.user.id,
            session_id: request.session_id,
            launch_type: request.log_launch_type,
            launch_url,
            message_type: request.message_type,
        }));

        Ok(launch)
    }
}

/// Derives the default adapter domain from the root account and request host.
fn default_domain(root_account: &RootAccount, request_host: &str) -> String {
    if root_account.domain.is_empty() {
        request_host.to_string()
    } else {
        root_account.domain.clone()
    }
}
