// lti-launch-core/src/core/mod.rs
// ============================================================================
// Module: LTI Launch Core Types
// Description: Domain types for launches, parties, and submissions.
// Purpose: Group the core data model behind a single module path.
// Dependencies: crate::core::{context, identifiers, launch, submission}
// ============================================================================

//! ## Overview
//! The core data model: opaque identifiers, launch value objects, the
//! parties participating in a launch, and submission version records.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod context;
pub mod identifiers;
pub mod launch;
pub mod submission;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::Context;
pub use context::ContextKind;
pub use context::RootAccount;
pub use context::Tool;
pub use context::User;
pub use identifiers::AnonymousId;
pub use identifiers::AssetProcessorId;
pub use identifiers::AssignmentId;
pub use identifiers::ContextId;
pub use identifiers::GroupId;
pub use identifiers::SessionId;
pub use identifiers::SubmissionId;
pub use identifiers::ToolId;
pub use identifiers::UserId;
pub use launch::Launch;
pub use launch::LaunchAuditRecord;
pub use launch::LaunchAuditRecordParams;
pub use launch::LaunchParams;
pub use launch::LogLaunchType;
pub use launch::MessageType;
pub use launch::MESSAGE_TYPE_CLAIM;
pub use launch::MessageTypeParseError;
pub use launch::TARGET_LINK_URI_CLAIM;
pub use submission::AssetProcessor;
pub use submission::AttemptSelector;
pub use submission::StudentSelector;
pub use submission::StudentSelectorParseError;
pub use submission::Submission;
pub use submission::SubmissionVersion;
