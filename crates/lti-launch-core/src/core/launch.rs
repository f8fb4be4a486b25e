// lti-launch-core/src/core/launch.rs
// ============================================================================
// Module: Launch Value Objects
// Description: Message types, launch parameters, and audit record payloads.
// Purpose: Model a single tool launch from construction through audit.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Launch`] is a transient value object assembled per request and handed
//! to the rendering layer; it is never persisted. Its parameters and resource
//! URL must always originate from the same adapter invocation for a single
//! [`MessageType`] — the orchestrator enforces this by construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::ContextId;
use crate::core::identifiers::SessionId;
use crate::core::identifiers::ToolId;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Claims
// ============================================================================

/// LTI claim carrying the launch target URL.
pub const TARGET_LINK_URI_CLAIM: &str =
    "https://purl.imsglobal.org/spec/lti/claim/target_link_uri";

/// LTI claim carrying the message type identifier.
pub const MESSAGE_TYPE_CLAIM: &str = "https://purl.imsglobal.org/spec/lti/claim/message_type";

// ============================================================================
// SECTION: Message Type
// ============================================================================

/// Launch message types recognized by the dispatcher.
///
/// The set is closed: unknown identifiers are rejected at the parse boundary
/// and carry the offending raw value for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// Asset processor settings UI launch.
    #[serde(rename = "LtiAssetProcessorSettingsRequest")]
    AssetProcessorSettings,
    /// Report review UI launch.
    #[serde(rename = "LtiReportReviewRequest")]
    ReportReview,
    /// End-user license agreement launch.
    #[serde(rename = "LtiEulaRequest")]
    Eula,
}

impl MessageType {
    /// Returns the stable wire identifier for the message type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssetProcessorSettings => "LtiAssetProcessorSettingsRequest",
            Self::ReportReview => "LtiReportReviewRequest",
            Self::Eula => "LtiEulaRequest",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a message type identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported message type: {0}")]
pub struct MessageTypeParseError(pub String);

impl FromStr for MessageType {
    type Err = MessageTypeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "LtiAssetProcessorSettingsRequest" => Ok(Self::AssetProcessorSettings),
            "LtiReportReviewRequest" => Ok(Self::ReportReview),
            "LtiEulaRequest" => Ok(Self::Eula),
            other => Err(MessageTypeParseError(other.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Launch Parameters
// ============================================================================

/// Signed payload fields produced by a single adapter invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchParams {
    /// Claim name to claim value.
    entries: BTreeMap<String, Value>,
}

impl LaunchParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a claim value.
    pub fn insert(&mut self, claim: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(claim.into(), value.into());
    }

    /// Returns a claim value by name.
    #[must_use]
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.entries.get(claim)
    }

    /// Returns the target link URI claim when present and non-empty.
    #[must_use]
    pub fn target_link_uri(&self) -> Option<&str> {
        self.entries
            .get(TARGET_LINK_URI_CLAIM)
            .and_then(Value::as_str)
            .filter(|uri| !uri.is_empty())
    }

    /// Iterates over claim entries in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Mutably iterates over claim entries.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    /// Returns the number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no claims are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for LaunchParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// SECTION: Launch
// ============================================================================

/// Transient launch value object handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Launch {
    /// Display text for the launch link.
    pub link_text: String,
    /// Analytics identifier derived from the tool.
    pub analytics_id: String,
    /// Resource URL computed by the adapter; set after dispatch.
    pub resource_url: Option<String>,
    /// Signed payload fields from the adapter invocation.
    pub params: LaunchParams,
}

impl Launch {
    /// Creates a launch shell with display metadata and no payload yet.
    #[must_use]
    pub const fn new(link_text: String, analytics_id: String) -> Self {
        Self {
            link_text,
            analytics_id,
            resource_url: None,
            params: LaunchParams::new(),
        }
    }
}

// ============================================================================
// SECTION: Launch Type
// ============================================================================

/// Launch type labels recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLaunchType {
    /// Launch initiated from a direct link.
    DirectLink,
    /// Launch initiated indirectly (e.g. embedded frame).
    IndirectLink,
    /// Launch initiated from a resource link placement.
    ResourceLink,
    /// Launch initiated from a content item placement.
    ContentItem,
}

impl LogLaunchType {
    /// Returns the stable audit label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectLink => "direct_link",
            Self::IndirectLink => "indirect_link",
            Self::ResourceLink => "resource_link",
            Self::ContentItem => "content_item",
        }
    }
}

// ============================================================================
// SECTION: Audit Record
// ============================================================================

/// Write-only audit record describing one successful launch.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchAuditRecord {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Tool being launched.
    pub tool_id: ToolId,
    /// Context the launch occurs in.
    pub context_id: ContextId,
    /// User performing the launch.
    pub user_id: UserId,
    /// Session identifier when available.
    pub session_id: Option<SessionId>,
    /// Launch type label.
    pub launch_type: LogLaunchType,
    /// Launch URL taken from the payload's target link URI.
    pub launch_url: String,
    /// Message type that was dispatched.
    pub message_type: MessageType,
}

/// Inputs required to construct a launch audit record.
pub struct LaunchAuditRecordParams {
    /// Tool being launched.
    pub tool_id: ToolId,
    /// Context the launch occurs in.
    pub context_id: ContextId,
    /// User performing the launch.
    pub user_id: UserId,
    /// Session identifier when available.
    pub session_id: Option<SessionId>,
    /// Launch type label.
    pub launch_type: LogLaunchType,
    /// Launch URL taken from the payload's target link URI.
    pub launch_url: String,
    /// Message type that was dispatched.
    pub message_type: MessageType,
}

impl LaunchAuditRecord {
    /// Creates a new audit record with a consistent timestamp.
    #[must_use]
    pub fn new(params: LaunchAuditRecordParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "lti_launch",
            timestamp_ms,
            tool_id: params.tool_id,
            context_id: params.context_id,
            user_id: params.user_id,
            session_id: params.session_id,
            launch_type: params.launch_type,
            launch_url: params.launch_url,
            message_type: params.message_type,
        }
    }
}
