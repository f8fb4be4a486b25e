// lti-launch-http/src/resolve.rs
// ============================================================================
// Module: Resubmission Resolution
// Description: Request-scoped resolution of resubmission notice targets.
// Purpose: Resolve processor, context, caller rights, and submission once.
// Dependencies: lti-launch-core, crate::{respond, server}
// ============================================================================

//! ## Overview
//! Resolution walks from the asset processor through its context and
//! permission checks to the target submission and version. Each lookup is
//! cached in the resolution struct so it runs at most once per request.
//! Group submissions are re-derived to the group's original-submission
//! representative through the notifier collaborator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lti_launch_core::AssetProcessor;
use lti_launch_core::AssetProcessorId;
use lti_launch_core::AttemptSelector;
use lti_launch_core::Context;
use lti_launch_core::NotifyError;
use lti_launch_core::Right;
use lti_launch_core::StoreError;
use lti_launch_core::StudentSelector;
use lti_launch_core::Submission;
use lti_launch_core::SubmissionVersion;
use lti_launch_core::UserId;

use crate::respond::ApiError;
use crate::server::AppState;

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Rights that allow acting on submission grades.
const GRADE_RIGHTS: &[Right] = &[Right::ViewAllGrades, Right::ManageGrades];

/// Raw resubmission request parameters.
#[derive(Debug, Clone)]
pub struct ResubmitParams {
    /// Raw `student_id` value; numeric or `anonymous:<id>`.
    pub student_id: String,
    /// Raw optional `attempt` value; parsed permissively.
    pub attempt: Option<String>,
}

/// Fully resolved resubmission notice target.
#[derive(Debug, Clone)]
pub struct ResolvedResubmission {
    /// Asset processor receiving the notice.
    pub processor: AssetProcessor,
    /// Notification target submission (group representative when grouped).
    pub submission: Submission,
    /// Selected submission version.
    pub version: SubmissionVersion,
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Maps repository failures onto the internal error kind.
fn store_error(error: StoreError) -> ApiError {
    ApiError::Internal(error.to_string())
}

/// Maps notifier failures onto response error kinds.
pub fn notify_error(error: NotifyError) -> ApiError {
    match error {
        NotifyError::GroupmateSubmissionNotFound => ApiError::MissingGroupmateSubmission,
        NotifyError::Delivery(message) => ApiError::Internal(message),
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Request-scoped resolution state; each field is computed at most once.
pub struct ResubmissionResolution<'a> {
    /// Shared server state.
    state: &'a AppState,
    /// Asset processor identifier from the path.
    asset_processor_id: AssetProcessorId,
    /// Caller performing the request.
    caller: UserId,
    /// Raw request parameters.
    params: ResubmitParams,
    /// Cached asset processor lookup.
    processor: Option<AssetProcessor>,
    /// Cached context lookup.
    context: Option<Context>,
    /// Cached submission lookup.
    submission: Option<Submission>,
}

impl<'a> ResubmissionResolution<'a> {
    /// Creates a new resolution for one request.
    #[must_use]
    pub const fn new(
        state: &'a AppState,
        asset_processor_id: AssetProcessorId,
        caller: UserId,
        params: ResubmitParams,
    ) -> Self {
        Self {
            state,
            asset_processor_id,
            caller,
            params,
            processor: None,
            context: None,
            submission: None,
        }
    }

    /// Resolves the asset processor, caching the lookup.
    fn processor(&mut self) -> Result<&AssetProcessor, ApiError> {
        if self.processor.is_none() {
            let processor = self
                .state
                .asset_processors
                .find(self.asset_processor_id)
                .map_err(store_error)?
                .ok_or(ApiError::NotFound("asset processor"))?;
            self.processor = Some(processor);
        }
        self.processor.as_ref().ok_or(ApiError::NotFound("asset processor"))
    }

    /// Resolves the context, caching the lookup.
    fn context(&mut self) -> Result<&Context, ApiError> {
        if self.context.is_none() {
            let context_id = self.processor()?.context_id;
            let context = self
                .state
                .contexts
                .find(context_id)
                .map_err(store_error)?
                .ok_or(ApiError::NotFound("context"))?;
            self.context = Some(context);
        }
        self.context.as_ref().ok_or(ApiError::NotFound("context"))
    }

    /// Checks the context is gradable and the caller holds grade rights.
    fn authorize(&mut self) -> Result<(), ApiError> {
        let caller = self.caller;
        let context = self.context()?.clone();
        if !context.is_gradable() {
            return Err(ApiError::MissingRequiredPermission);
        }
        if !self.state.permissions.grants_any_right(caller, context.id, GRADE_RIGHTS) {
            return Err(ApiError::MissingRequiredPermission);
        }
        Ok(())
    }

    /// Resolves the submission from the student selector, caching the lookup.
    fn submission(&mut self) -> Result<&Submission, ApiError> {
        if self.submission.is_none() {
            let assignment_id = self.processor()?.assignment_id;
            let selector: StudentSelector = self
                .params
                .student_id
                .parse()
                .map_err(|_| ApiError::NotFound("submission"))?;
            let submission = match selector {
                StudentSelector::UserId(user_id) => self
                    .state
                    .submissions
                    .find_by_user(assignment_id, user_id)
                    .map_err(store_error)?,
                StudentSelector::Anonymous(anonymous_id) => self
                    .state
                    .submissions
                    .find_by_anonymous_id(assignment_id, &anonymous_id)
                    .map_err(store_error)?,
            }
            .ok_or(ApiError::NotFound("submission"))?;
            self.submission = Some(submission);
        }
        self.submission.as_ref().ok_or(ApiError::NotFound("submission"))
    }

    /// Runs the full resolution and returns the notification target.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for missing records, missing rights, or a
    /// missing group representative.
    pub fn resolve(mut self) -> Result<ResolvedResubmission, ApiError> {
        self.authorize()?;
        let submission = self.submission()?.clone();
        let processor = self.processor()?.clone();

        let target = if submission.group_id.is_some() {
            self.state.notifier.original_submission_for_group(&submission).map_err(notify_error)?
        } else {
            submission
        };

        let selector = AttemptSelector::parse(self.params.attempt.as_deref());
        let version =
            target.select_version(selector).cloned().ok_or(ApiError::NotFound("submission"))?;

        Ok(ResolvedResubmission {
            processor,
            submission: target,
            version,
        })
    }
}
