// lti-launch-core/src/core/submission.rs
// ============================================================================
// Module: Submission Resolution Policy
// Description: Student selectors, attempt selection, and submission records.
// Purpose: Resolve notification targets from untrusted request parameters.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Request parameters identify a student either by raw numeric user id or by
//! a prefixed anonymous token (`anonymous:<id>`), and optionally select a
//! historical attempt. Attempt selection is deliberately permissive: absent,
//! non-numeric, or non-positive values all mean "latest version", and a
//! positive value that matches no recorded attempt falls back to latest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AnonymousId;
use crate::core::identifiers::AssetProcessorId;
use crate::core::identifiers::AssignmentId;
use crate::core::identifiers::ContextId;
use crate::core::identifiers::GroupId;
use crate::core::identifiers::SubmissionId;
use crate::core::identifiers::ToolId;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Asset Processor
// ============================================================================

/// Asset processor registration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetProcessor {
    /// Asset processor identifier.
    pub id: AssetProcessorId,
    /// Assignment whose submissions the processor reviews.
    pub assignment_id: AssignmentId,
    /// Context owning the assignment.
    pub context_id: ContextId,
    /// Tool registered as the processor.
    pub tool_id: ToolId,
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// One historical version of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionVersion {
    /// Attempt number recorded for this version.
    pub attempt: u32,
    /// Opaque body reference for the version.
    pub body_ref: String,
}

/// Submission record with its version history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission identifier.
    pub id: SubmissionId,
    /// Owning assignment.
    pub assignment_id: AssignmentId,
    /// Submitting user.
    pub user_id: UserId,
    /// Anonymous grading identifier when anonymous grading is active.
    pub anonymous_id: Option<AnonymousId>,
    /// Group the submission belongs to, when it is a group submission.
    pub group_id: Option<GroupId>,
    /// Version history, oldest first. Never empty for a real submission.
    pub versions: Vec<SubmissionVersion>,
}

impl Submission {
    /// Returns the latest version, if any exist.
    #[must_use]
    pub fn latest_version(&self) -> Option<&SubmissionVersion> {
        self.versions.last()
    }

    /// Selects the version matching the selector, falling back to latest.
    #[must_use]
    pub fn select_version(&self, selector: AttemptSelector) -> Option<&SubmissionVersion> {
        match selector {
            AttemptSelector::Latest => self.latest_version(),
            AttemptSelector::Attempt(attempt) => self
                .versions
                .iter()
                .find(|version| version.attempt == attempt)
                .or_else(|| self.latest_version()),
        }
    }
}

// ============================================================================
// SECTION: Student Selector
// ============================================================================

/// Prefix marking an anonymous student token.
const ANONYMOUS_PREFIX: &str = "anonymous:";

/// Parsed `student_id` request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentSelector {
    /// Raw numeric user id.
    UserId(UserId),
    /// Anonymous grading token.
    Anonymous(AnonymousId),
}

/// Error raised when a `student_id` parameter cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid student id: {0}")]
pub struct StudentSelectorParseError(pub String);

impl FromStr for StudentSelector {
    type Err = StudentSelectorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(token) = value.strip_prefix(ANONYMOUS_PREFIX) {
            if token.is_empty() {
                return Err(StudentSelectorParseError(value.to_string()));
            }
            return Ok(Self::Anonymous(AnonymousId::new(token)));
        }
        value
            .parse::<u64>()
            .ok()
            .and_then(UserId::from_raw)
            .map(Self::UserId)
            .ok_or_else(|| StudentSelectorParseError(value.to_string()))
    }
}

// ============================================================================
// SECTION: Attempt Selector
// ============================================================================

/// Parsed `attempt` request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptSelector {
    /// Latest submission version.
    Latest,
    /// Specific attempt number; falls back to latest when unmatched.
    Attempt(u32),
}

impl AttemptSelector {
    /// Parses an optional attempt parameter permissively.
    ///
    /// Absent, non-numeric, and non-positive values all select the latest
    /// version. This mirrors the host behavior; do not tighten it.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
            Some(attempt) if attempt > 0 => {
                u32::try_from(attempt).map_or(Self::Latest, Self::Attempt)
            }
            _ => Self::Latest,
        }
    }
}
