// lti-launch-core/src/interfaces/mod.rs
// ============================================================================
// Module: LTI Launch Interfaces
// Description: Host-agnostic interfaces for adapters, expansion, and storage.
// Purpose: Define the contract surfaces used by the launch runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the launch core integrates with the host LMS without
//! embedding framework details. Repositories, permission grants, the signing
//! adapter library, and the notification channel are all collaborators behind
//! these seams. Implementations must fail closed on missing data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::AnonymousId;
use crate::core::AssetProcessor;
use crate::core::AssetProcessorId;
use crate::core::AssignmentId;
use crate::core::Context;
use crate::core::ContextId;
use crate::core::LaunchAuditRecord;
use crate::core::LaunchParams;
use crate::core::MessageType;
use crate::core::RootAccount;
use crate::core::SessionId;
use crate::core::Submission;
use crate::core::SubmissionVersion;
use crate::core::Tool;
use crate::core::ToolId;
use crate::core::User;
use crate::core::UserId;

// ============================================================================
// SECTION: Launch Adapter
// ============================================================================

/// Adapter construction options.
///
/// Defaults come from the request host and root-account context; callers may
/// override the domain and supply extra claim values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Domain the adapter should sign launches for.
    pub domain: Option<String>,
    /// Extra claim values merged into the payload.
    pub extra_claims: BTreeMap<String, Value>,
}

impl AdapterOptions {
    /// Merges caller overrides into these options.
    ///
    /// An override domain replaces the default; extra claims extend and win
    /// on key collisions.
    #[must_use]
    pub fn merged_with(mut self, overrides: Self) -> Self {
        if overrides.domain.is_some() {
            self.domain = overrides.domain;
        }
        self.extra_claims.extend(overrides.extra_claims);
        self
    }
}

/// Launch adapter errors.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The adapter does not implement the requested message type.
    #[error("adapter does not support message type: {0}")]
    Unsupported(MessageType),
    /// Payload signing failed.
    #[error("payload signing failed: {0}")]
    Signing(String),
}

/// Signed-payload producer for a single launch request.
///
/// One adapter instance is constructed per request; each operation produces
/// the complete payload for its message type.
pub trait LaunchAdapter {
    /// Builds the asset processor settings payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the type is unsupported or signing fails.
    fn asset_processor_settings(&self) -> Result<LaunchParams, AdapterError>;

    /// Builds the report review payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the type is unsupported or signing fails.
    fn report_review(&self) -> Result<LaunchParams, AdapterError>;

    /// Builds the EULA payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the type is unsupported or signing fails.
    fn eula(&self) -> Result<LaunchParams, AdapterError>;

    /// Returns the launch URL the adapter computed for this request.
    fn launch_url(&self) -> String;
}

/// Inputs required to construct an adapter.
#[derive(Debug, Clone)]
pub struct AdapterRequest {
    /// Tool being launched.
    pub tool: Tool,
    /// Acting user.
    pub user: User,
    /// Launch context.
    pub context: Context,
    /// Return URL the tool redirects back to.
    pub return_url: String,
    /// Merged adapter options.
    pub options: AdapterOptions,
}

/// Factory constructing one adapter per launch request.
pub trait LaunchAdapterFactory: Send + Sync {
    /// Builds an adapter bound to the request and its variable expander.
    fn adapter(
        &self,
        request: AdapterRequest,
        expander: Arc<dyn VariableExpander>,
        expansion: ExpansionContext,
    ) -> Box<dyn LaunchAdapter>;
}

// ============================================================================
// SECTION: Variable Expander
// ============================================================================

/// State a variable expansion evaluates against.
#[derive(Debug, Clone)]
pub struct ExpansionContext {
    /// Root account for instance-wide values.
    pub root_account: RootAccount,
    /// Launch context.
    pub context: Context,
    /// Current user.
    pub user: User,
    /// Tool being launched.
    pub tool: Tool,
    /// Session identifier when available.
    pub session_id: Option<SessionId>,
    /// Display text of the in-progress launch.
    pub link_text: Option<String>,
    /// Caller-supplied entries; these win over built-in resolvers.
    pub overrides: BTreeMap<String, String>,
}

/// Best-effort substitution of `$Variable.name` placeholders in payloads.
///
/// Unknown or blocked variables are left unexpanded; expansion never fails.
pub trait VariableExpander: Send + Sync {
    /// Expands placeholder values in the payload in place.
    fn expand(&self, expansion: &ExpansionContext, params: &mut LaunchParams);
}

// ============================================================================
// SECTION: Repositories
// ============================================================================

/// Repository errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying store I/O failure.
    #[error("store io error: {0}")]
    Io(String),
    /// Store reported an error.
    #[error("store error: {0}")]
    Store(String),
}

/// Tool repository.
pub trait ToolStore: Send + Sync {
    /// Loads a tool by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find(&self, id: ToolId) -> Result<Option<Tool>, StoreError>;
}

/// User repository backing the request's user/session context.
pub trait UserStore: Send + Sync {
    /// Loads a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

/// Asset processor repository.
pub trait AssetProcessorStore: Send + Sync {
    /// Loads an asset processor by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find(&self, id: AssetProcessorId) -> Result<Option<AssetProcessor>, StoreError>;
}

/// Launch context repository.
pub trait ContextStore: Send + Sync {
    /// Loads a context by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find(&self, id: ContextId) -> Result<Option<Context>, StoreError>;
}

/// Submission repository scoped to an assignment.
pub trait SubmissionStore: Send + Sync {
    /// Loads the submission a user made for an assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_by_user(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
    ) -> Result<Option<Submission>, StoreError>;

    /// Loads a submission by its anonymous grading identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_by_anonymous_id(
        &self,
        assignment_id: AssignmentId,
        anonymous_id: &AnonymousId,
    ) -> Result<Option<Submission>, StoreError>;
}

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Rights the launch flows check before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Right {
    /// May view grades for all students in the context.
    ViewAllGrades,
    /// May manage grades in the context.
    ManageGrades,
}

/// Permission grant checker backed by the host authorization model.
pub trait PermissionChecker: Send + Sync {
    /// Returns true when the user holds the right in the context.
    fn grants_right(&self, user_id: UserId, context_id: ContextId, right: Right) -> bool;

    /// Returns true when the user holds any of the rights in the context.
    fn grants_any_right(&self, user_id: UserId, context_id: ContextId, rights: &[Right]) -> bool {
        rights.iter().any(|right| self.grants_right(user_id, context_id, *right))
    }
}

// ============================================================================
// SECTION: Resubmission Notifier
// ============================================================================

/// Resubmission notifier errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The group has no original submission representative.
    #[error("groupmate submission not found")]
    GroupmateSubmissionNotFound,
    /// Notice delivery failed.
    #[error("notice delivery failed: {0}")]
    Delivery(String),
}

/// Delivers resubmission notices to an asset processor tool.
pub trait ResubmissionNotifier: Send + Sync {
    /// Re-derives the original-submission representative for a group
    /// submission.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::GroupmateSubmissionNotFound`] when the group
    /// linkage is missing its representative.
    fn original_submission_for_group(
        &self,
        submission: &Submission,
    ) -> Result<Submission, NotifyError>;

    /// Sends the resubmission notice for the selected version.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when delivery fails.
    fn notify(
        &self,
        processor: &AssetProcessor,
        submission: &Submission,
        version: &SubmissionVersion,
    ) -> Result<(), NotifyError>;
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Audit sink for launch events.
pub trait LaunchAuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, record: &LaunchAuditRecord);
}
