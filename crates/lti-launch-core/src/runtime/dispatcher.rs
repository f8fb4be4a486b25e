// lti-launch-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Launch Message Dispatcher
// Description: Message-type dispatch onto adapter operations.
// Purpose: Select and invoke the correct adapter operation per message type.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The dispatcher maps each [`MessageType`] onto its adapter operation and
//! validates the resulting payload. It has no side effects beyond
//! delegation; audit logging happens in the orchestrator only after dispatch
//! succeeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::LaunchParams;
use crate::core::MessageType;
use crate::interfaces::AdapterError;
use crate::interfaces::LaunchAdapter;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Dispatch errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The message type is not supported; carries the offending identifier.
    #[error("unsupported message type: {0}")]
    UnsupportedMessageType(String),
    /// The adapter payload is missing a non-empty target link URI.
    #[error("payload for {0} is missing target link uri")]
    MissingTargetLinkUri(MessageType),
    /// Payload signing failed inside the adapter.
    #[error("payload signing failed: {0}")]
    Signing(String),
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Dispatches a message type onto the corresponding adapter operation.
///
/// Every returned payload is guaranteed to carry a non-empty target link
/// URI claim.
///
/// # Errors
///
/// Returns [`DispatchError::UnsupportedMessageType`] when the adapter does
/// not implement the type, [`DispatchError::MissingTargetLinkUri`] when the
/// payload lacks the claim, and [`DispatchError::Signing`] on signing
/// failures.
pub fn dispatch(
    adapter: &dyn LaunchAdapter,
    message_type: MessageType,
) -> Result<LaunchParams, DispatchError> {
    let result = match message_type {
        MessageType::AssetProcessorSettings => adapter.asset_processor_settings(),
        MessageType::ReportReview => adapter.report_review(),
        MessageType::Eula => adapter.eula(),
    };
    let params = result.map_err(|err| match err {
        AdapterError::Unsupported(unsupported) => {
            DispatchError::UnsupportedMessageType(unsupported.to_string())
        }
        AdapterError::Signing(message) => DispatchError::Signing(message),
    })?;
    if params.target_link_uri().is_none() {
        return Err(DispatchError::MissingTargetLinkUri(message_type));
    }
    Ok(params)
}
