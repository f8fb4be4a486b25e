// lti-launch-core/src/runtime/mod.rs
// ============================================================================
// Module: LTI Launch Runtime
// Description: Dispatcher, orchestrator, and in-memory repositories.
// Purpose: Group runtime behavior behind a single module path.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime layer turns a launch request into a rendered-ready
//! [`crate::core::Launch`]: the dispatcher selects the adapter operation for
//! a message type, and the orchestrator assembles the launch and emits its
//! audit record.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dispatcher;
pub mod orchestrator;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dispatcher::DispatchError;
pub use dispatcher::dispatch;
pub use orchestrator::LaunchOrchestrator;
pub use orchestrator::LaunchRequest;
pub use orchestrator::OrchestrationError;
pub use store::DeliveredNotice;
pub use store::InMemoryAssetProcessorStore;
pub use store::InMemoryContextStore;
pub use store::InMemoryPermissionChecker;
pub use store::InMemoryResubmissionNotifier;
pub use store::InMemorySubmissionStore;
pub use store::InMemoryToolStore;
pub use store::InMemoryUserStore;
