// lti-launch-http/src/i18n.rs
// ============================================================================
// Module: HTTP Internationalization Helpers
// Description: Provides message catalog and translation utilities for responses.
// Purpose: Centralize user-facing strings for future localization support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! User-facing response strings live in a small translation catalog to
//! enforce consistent messaging and to prepare for future locales. All
//! response bodies should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself to avoid panics.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"resource"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries loaded into the localized message bundle.
const CATALOG_ITEMS: &[(&str, &str)] = &[
    (
        "error.unsupported_message_type",
        "The message type {message_type} is not supported for this launch.",
    ),
    (
        "error.missing_required_permission",
        "You do not have permission to manage grades in this context.",
    ),
    ("error.not_found", "The requested {resource} could not be found."),
    (
        "error.groupmate_submission_not_found",
        "No originating submission could be found for this group.",
    ),
    ("error.internal", "An internal error occurred while handling the request."),
    ("serve.init_failed", "Failed to start launch server: {error}"),
    ("serve.failed", "Launch server failed: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("config.validate.write_failed", "Failed to report validation result: {error}"),
];

/// Static fallback used when a catalog key has no localized string.
pub const FALLBACK_MESSAGE: &str = "The request could not be completed.";

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the English fallback catalog while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Translates `key`, falling back to [`FALLBACK_MESSAGE`] on missing keys.
#[must_use]
pub fn translate_or_fallback(key: &str, args: Vec<MessageArg>) -> String {
    if catalog().contains_key(key) {
        translate(key, args)
    } else {
        FALLBACK_MESSAGE.to_string()
    }
}

/// Returns the static English catalog used by the HTTP tier.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
