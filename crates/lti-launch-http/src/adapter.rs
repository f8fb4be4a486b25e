// lti-launch-http/src/adapter.rs
// ============================================================================
// Module: Reference Launch Adapter
// Description: Deterministic unsigned adapter for tests and local runs.
// Purpose: Produce complete launch payloads without an external signer.
// Dependencies: lti-launch-core, serde_json
// ============================================================================

//! ## Overview
//! The reference adapter builds the full claim set for each supported
//! message type and runs the variable expander over it, but performs no
//! signing. Production deployments replace it with an adapter backed by the
//! LTI Advantage signing library behind the same
//! [`lti_launch_core::LaunchAdapterFactory`] seam.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use lti_launch_core::AdapterError;
use lti_launch_core::AdapterRequest;
use lti_launch_core::ExpansionContext;
use lti_launch_core::LaunchAdapter;
use lti_launch_core::LaunchAdapterFactory;
use lti_launch_core::LaunchParams;
use lti_launch_core::MESSAGE_TYPE_CLAIM;
use lti_launch_core::MessageType;
use lti_launch_core::TARGET_LINK_URI_CLAIM;
use lti_launch_core::VariableExpander;
use serde_json::json;

// ============================================================================
// SECTION: Claims
// ============================================================================

/// LTI claim carrying the protocol version.
const VERSION_CLAIM: &str = "https://purl.imsglobal.org/spec/lti/claim/version";

/// LTI claim carrying launch presentation hints.
const LAUNCH_PRESENTATION_CLAIM: &str =
    "https://purl.imsglobal.org/spec/lti/claim/launch_presentation";

/// LTI claim carrying the launch context.
const CONTEXT_CLAIM: &str = "https://purl.imsglobal.org/spec/lti/claim/context";

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Factory producing one [`ReferenceAdapter`] per launch request.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceAdapterFactory;

impl LaunchAdapterFactory for ReferenceAdapterFactory {
    fn adapter(
        &self,
        request: AdapterRequest,
        expander: Arc<dyn VariableExpander>,
        expansion: ExpansionContext,
    ) -> Box<dyn LaunchAdapter> {
        Box::new(ReferenceAdapter {
            request,
            expander,
            expansion,
        })
    }
}

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Unsigned adapter bound to one launch request.
struct ReferenceAdapter {
    /// Request inputs including merged options.
    request: AdapterRequest,
    /// Expander applied to every payload before it is returned.
    expander: Arc<dyn VariableExpander>,
    /// Expansion state for the request.
    expansion: ExpansionContext,
}

impl ReferenceAdapter {
    /// Returns the tool base URL without a trailing slash.
    fn tool_base(&self) -> &str {
        self.request.tool.url.trim_end_matches('/')
    }

    /// Returns the target link URI for a message type.
    fn target_for(&self, message_type: MessageType) -> String {
        let path = match message_type {
            MessageType::AssetProcessorSettings => "settings",
            MessageType::ReportReview => "report",
            MessageType::Eula => "eula",
        };
        format!("{}/lti/{path}", self.tool_base())
    }

    /// Builds the payload for a message type.
    fn build(&self, message_type: MessageType) -> Result<LaunchParams, AdapterError> {
        let mut params = LaunchParams::new();
        params.insert(MESSAGE_TYPE_CLAIM, message_type.as_str());
        params.insert(VERSION_CLAIM, "1.3.0");
        params.insert(TARGET_LINK_URI_CLAIM, self.target_for(message_type));
        params.insert("sub", self.request.user.id.to_string());
        if let Some(domain) = &self.request.options.domain {
            params.insert("iss", format!("https://{domain}"));
        }
        params.insert(
            CONTEXT_CLAIM,
            json!({
                "id": self.request.context.id.to_string(),
                "title": self.request.context.title,
            }),
        );
        params.insert(
            LAUNCH_PRESENTATION_CLAIM,
            json!({ "return_url": self.request.return_url }),
        );
        for (claim, value) in self.request.options.extra_claims.clone() {
            params.insert(claim, value);
        }
        self.expander.expand(&self.expansion, &mut params);
        Ok(params)
    }
}

impl LaunchAdapter for ReferenceAdapter {
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
        format!("{}/lti/launch", self.tool_base())
    }
}
