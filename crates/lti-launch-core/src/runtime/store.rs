// lti-launch-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Repositories
// Description: In-memory implementations of the repository interfaces.
// Purpose: Back tests and single-process deployments without a database.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! These repositories hold records in process memory behind read/write
//! locks. They implement the same interfaces a relational backend would and
//! are the default wiring for tests and local runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::core::AnonymousId;
use crate::core::AssetProcessor;
use crate::core::AssetProcessorId;
use crate::core::AssignmentId;
use crate::core::Context;
use crate::core::ContextId;
use crate::core::GroupId;
use crate::core::Submission;
use crate::core::SubmissionId;
use crate::core::SubmissionVersion;
use crate::core::Tool;
use crate::core::ToolId;
use crate::core::User;
use crate::core::UserId;
use crate::interfaces::AssetProcessorStore;
use crate::interfaces::ContextStore;
use crate::interfaces::NotifyError;
use crate::interfaces::PermissionChecker;
use crate::interfaces::ResubmissionNotifier;
use crate::interfaces::Right;
use crate::interfaces::StoreError;
use crate::interfaces::SubmissionStore;
use crate::interfaces::ToolStore;
use crate::interfaces::UserStore;

/// Maps a poisoned-lock failure onto a store error.
fn poisoned() -> StoreError {
    StoreError::Store("repository lock poisoned".to_string())
}

// ============================================================================
// SECTION: Tool Store
// ============================================================================

/// In-memory tool repository.
#[derive(Debug, Default)]
pub struct InMemoryToolStore {
    /// Tools keyed by identifier.
    tools: RwLock<BTreeMap<ToolId, Tool>>,
}

impl InMemoryToolStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a tool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn insert(&self, tool: Tool) -> Result<(), StoreError> {
        self.tools.write().map_err(|_| poisoned())?.insert(tool.id, tool);
        Ok(())
    }
}

impl ToolStore for InMemoryToolStore {
    fn find(&self, id: ToolId) -> Result<Option<Tool>, StoreError> {
        Ok(self.tools.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
}

// ============================================================================
// SECTION: User Store
// ============================================================================

/// In-memory user repository.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    /// Users keyed by identifier.
    users: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn insert(&self, user: User) -> Result<(), StoreError> {
        self.users.write().map_err(|_| poisoned())?.insert(user.id, user);
        Ok(())
    }
}

impl UserStore for InMemoryUserStore {
    fn find(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
}

// ============================================================================
// SECTION: Asset Processor Store
// ============================================================================

/// In-memory asset processor repository.
#[derive(Debug, Default)]
pub struct InMemoryAssetProcessorStore {
    /// Asset processors keyed by identifier.
    processors: RwLock<BTreeMap<AssetProcessorId, AssetProcessor>>,
}

impl InMemoryAssetProcessorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an asset processor.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn insert(&self, processor: AssetProcessor) -> Result<(), StoreError> {
        self.processors.write().map_err(|_| poisoned())?.insert(processor.id, processor);
        Ok(())
    }
}

impl AssetProcessorStore for InMemoryAssetProcessorStore {
    fn find(&self, id: AssetProcessorId) -> Result<Option<AssetProcessor>, StoreError> {
        Ok(self.processors.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
}

// ============================================================================
// SECTION: Context Store
// ============================================================================

/// In-memory context repository.
#[derive(Debug, Default)]
pub struct InMemoryContextStore {
    /// Contexts keyed by identifier.
    contexts: RwLock<BTreeMap<ContextId, Context>>,
}

impl InMemoryContextStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a context.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn insert(&self, context: Context) -> Result<(), StoreError> {
        self.contexts.write().map_err(|_| poisoned())?.insert(context.id, context);
        Ok(())
    }
}

impl ContextStore for InMemoryContextStore {
    fn find(&self, id: ContextId) -> Result<Option<Context>, StoreError> {
        Ok(self.contexts.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
}

// ============================================================================
// SECTION: Submission Store
// ============================================================================

/// In-memory submission repository.
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    /// All submissions; lookups scan within the assignment scope.
    submissions: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a submission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn insert(&self, submission: Submission) -> Result<(), StoreError> {
        self.submissions.write().map_err(|_| poisoned())?.push(submission);
        Ok(())
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn find_by_user(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
    ) -> Result<Option<Submission>, StoreError> {
        Ok(self
            .submissions
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|submission| {
                submission.assignment_id == assignment_id && submission.user_id == user_id
            })
            .cloned())
    }

    fn find_by_anonymous_id(
        &self,
        assignment_id: AssignmentId,
        anonymous_id: &AnonymousId,
    ) -> Result<Option<Submission>, StoreError> {
        Ok(self
            .submissions
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|submission| {
                submission.assignment_id == assignment_id
                    && submission.anonymous_id.as_ref() == Some(anonymous_id)
            })
            .cloned())
    }
}

// ============================================================================
// SECTION: Permission Checker
// ============================================================================

/// In-memory permission grants.
///
/// A missing grant or a poisoned lock both deny; permission checks never
/// fail open.
#[derive(Debug, Default)]
pub struct InMemoryPermissionChecker {
    /// Granted (user, context, right) triples.
    grants: RwLock<Vec<(UserId, ContextId, Right)>>,
}

impl InMemoryPermissionChecker {
    /// Creates an empty checker that denies everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a right to a user in a context.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn grant(
        &self,
        user_id: UserId,
        context_id: ContextId,
        right: Right,
    ) -> Result<(), StoreError> {
        self.grants.write().map_err(|_| poisoned())?.push((user_id, context_id, right));
        Ok(())
    }
}

impl PermissionChecker for InMemoryPermissionChecker {
    fn grants_right(&self, user_id: UserId, context_id: ContextId, right: Right) -> bool {
        self.grants.read().is_ok_and(|grants| {
            grants.iter().any(|grant| *grant == (user_id, context_id, right))
        })
    }
}

// ============================================================================
// SECTION: Resubmission Notifier
// ============================================================================

/// One delivered resubmission notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredNotice {
    /// Asset processor the notice was sent to.
    pub asset_processor_id: AssetProcessorId,
    /// Submission the notice describes.
    pub submission_id: SubmissionId,
    /// Attempt number of the notified version.
    pub attempt: u32,
}

/// In-memory resubmission notifier recording delivered notices.
#[derive(Debug, Default)]
pub struct InMemoryResubmissionNotifier {
    /// Original-submission representative per group.
    representatives: RwLock<BTreeMap<GroupId, Submission>>,
    /// Notices delivered so far.
    delivered: RwLock<Vec<DeliveredNotice>>,
}

impl InMemoryResubmissionNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the original-submission representative for a group.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn set_representative(
        &self,
        group_id: GroupId,
        submission: Submission,
    ) -> Result<(), StoreError> {
        self.representatives.write().map_err(|_| poisoned())?.insert(group_id, submission);
        Ok(())
    }

    /// Returns the notices delivered so far.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lock is poisoned.
    pub fn delivered(&self) -> Result<Vec<DeliveredNotice>, StoreError> {
        Ok(self.delivered.read().map_err(|_| poisoned())?.clone())
    }
}

impl ResubmissionNotifier for InMemoryResubmissionNotifier {
    fn original_submission_for_group(
        &self,
        submission: &Submission,
    ) -> Result<Submission, NotifyError> {
        let group_id = submission.group_id.ok_or(NotifyError::GroupmateSubmissionNotFound)?;
        self.representatives
            .read()
            .map_err(|_| NotifyError::Delivery("representative lock poisoned".to_string()))?
            .get(&group_id)
            .cloned()
            .ok_or(NotifyError::GroupmateSubmissionNotFound)
    }

    fn notify(
        &self,
        processor: &AssetProcessor,
        submission: &Submission,
        version: &SubmissionVersion,
    ) -> Result<(), NotifyError> {
        self.delivered
            .write()
            .map_err(|_| NotifyError::Delivery("notice lock poisoned".to_string()))?
            .push(DeliveredNotice {
                asset_processor_id: processor.id,
                submission_id: submission.id,
                attempt: version.attempt,
            });
        Ok(())
    }
}
