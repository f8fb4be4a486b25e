// lti-launch-core/src/lib.rs
// ============================================================================
// Module: LTI Launch Core Library
// Description: Public API surface for the LTI launch core.
// Purpose: Expose launch types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! LTI launch core provides message-type dispatch, launch orchestration, and
//! submission resolution policy for asset-processor launches. It is
//! host-agnostic and integrates with the LMS through explicit interfaces
//! rather than embedding into a web framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::AdapterError;
pub use interfaces::AdapterOptions;
pub use interfaces::AdapterRequest;
pub use interfaces::AssetProcessorStore;
pub use interfaces::ContextStore;
pub use interfaces::ExpansionContext;
pub use interfaces::LaunchAdapter;
pub use interfaces::LaunchAdapterFactory;
pub use interfaces::LaunchAuditSink;
pub use interfaces::NotifyError;
pub use interfaces::PermissionChecker;
pub use interfaces::ResubmissionNotifier;
pub use interfaces::Right;
pub use interfaces::StoreError;
pub use interfaces::SubmissionStore;
pub use interfaces::ToolStore;
pub use interfaces::UserStore;
pub use interfaces::VariableExpander;
pub use runtime::DeliveredNotice;
pub use runtime::DispatchError;
pub use runtime::InMemoryAssetProcessorStore;
pub use runtime::InMemoryContextStore;
pub use runtime::InMemoryPermissionChecker;
pub use runtime::InMemoryResubmissionNotifier;
pub use runtime::InMemorySubmissionStore;
pub use runtime::InMemoryToolStore;
pub use runtime::InMemoryUserStore;
pub use runtime::LaunchOrchestrator;
pub use runtime::LaunchRequest;
pub use runtime::OrchestrationError;
pub use runtime::dispatch;
