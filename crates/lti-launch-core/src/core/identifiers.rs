// lti-launch-core/src/core/identifiers.rs
// ============================================================================
// Module: LTI Launch Identifiers
// Description: Canonical opaque identifiers for launch participants and records.
// Purpose: Provide strongly typed, serializable IDs with stable forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout the launch
//! core. Numeric identifiers wrap non-zero integers and serialize as numbers;
//! string identifiers are opaque and serialize as strings. Validation is
//! handled at request boundaries rather than within these simple wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Numeric Identifier Macro
// ============================================================================

/// Declares a non-zero numeric identifier wrapper.
macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Creates the identifier from a raw value, rejecting zero.
            #[must_use]
            pub fn from_raw(value: u64) -> Option<Self> {
                NonZeroU64::new(value).map(Self)
            }

            /// Returns the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

/// Declares an opaque string identifier wrapper.
macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

numeric_id! {
    /// User identifier within the host LMS.
    UserId
}

numeric_id! {
    /// External tool registration identifier.
    ToolId
}

numeric_id! {
    /// Launch context (course or account) identifier.
    ContextId
}

numeric_id! {
    /// Assignment identifier owning submissions.
    AssignmentId
}

numeric_id! {
    /// Asset processor registration identifier.
    AssetProcessorId
}

numeric_id! {
    /// Submission identifier.
    SubmissionId
}

numeric_id! {
    /// Group identifier for group submissions.
    GroupId
}

string_id! {
    /// Opaque per-request session identifier.
    SessionId
}

string_id! {
    /// Anonymous grading identifier attached to a submission.
    AnonymousId
}
