// lti-launch-core/src/core/context.rs
// ============================================================================
// Module: Launch Parties
// Description: Tool, user, context, and root-account snapshots for a launch.
// Purpose: Carry the participant state a launch and its expansion consume.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! These types are request-scoped snapshots of persistent LMS records. The
//! launch core never loads or saves them; repositories behind
//! [`crate::interfaces`] produce them and the orchestrator consumes them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ContextId;
use crate::core::identifiers::ToolId;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Tool
// ============================================================================

/// External tool registration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool identifier.
    pub id: ToolId,
    /// Display label shown on launch links.
    pub label: String,
    /// Tool domain used for analytics ids and default adapter domains.
    pub domain: Option<String>,
    /// Base launch URL registered for the tool.
    pub url: String,
}

impl Tool {
    /// Returns the analytics identifier: domain when present, otherwise id.
    #[must_use]
    pub fn analytics_id(&self) -> String {
        self.domain.clone().unwrap_or_else(|| self.id.to_string())
    }
}

// ============================================================================
// SECTION: User
// ============================================================================

/// Acting user snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Active pseudonym (login) when one is attached to the session.
    pub pseudonym: Option<String>,
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Kind of container a launch context can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    /// Course context; gradable container.
    Course,
    /// Account context; not gradable.
    Account,
}

/// Launch context snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Context identifier.
    pub id: ContextId,
    /// Context kind.
    pub kind: ContextKind,
    /// Display title.
    pub title: String,
}

impl Context {
    /// Returns true when the context can hold gradable submissions.
    #[must_use]
    pub const fn is_gradable(&self) -> bool {
        matches!(self.kind, ContextKind::Course)
    }
}

// ============================================================================
// SECTION: Root Account
// ============================================================================

/// Root account snapshot supplying instance-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAccount {
    /// Canonical host domain for the LMS instance.
    pub domain: String,
}
