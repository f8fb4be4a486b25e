// lti-launch-expander/src/variables.rs
// ============================================================================
// Module: Built-In Variable Resolvers
// Description: Resolvers for the standard context/user/tool variables.
// Purpose: Provide the fixed entry set every launch expansion can rely on.
// Dependencies: lti-launch-core
// ============================================================================

//! ## Overview
//! Built-in resolvers cover the fixed entry set the orchestrator always
//! supplies: current user, current pseudonym, tool, launch context, root
//! account, session, and the in-progress launch's link text. Each resolver
//! returns `None` when its backing state is absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lti_launch_core::ExpansionContext;

use crate::registry::VariableResolver;

// ============================================================================
// SECTION: Resolvers
// ============================================================================

/// Resolves `Context.id`.
struct ContextIdResolver;

impl VariableResolver for ContextIdResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        Some(expansion.context.id.to_string())
    }
}

/// Resolves `Context.title`.
struct ContextTitleResolver;

impl VariableResolver for ContextTitleResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        Some(expansion.context.title.clone())
    }
}

/// Resolves `User.id`.
struct UserIdResolver;

impl VariableResolver for UserIdResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        Some(expansion.user.id.to_string())
    }
}

/// Resolves `User.username` from the active pseudonym.
struct UserUsernameResolver;

impl VariableResolver for UserUsernameResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        expansion.user.pseudonym.clone()
    }
}

/// Resolves `Tool.id`.
struct ToolIdResolver;

impl VariableResolver for ToolIdResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        Some(expansion.tool.id.to_string())
    }
}

/// Resolves `Tool.domain`.
struct ToolDomainResolver;

impl VariableResolver for ToolDomainResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        expansion.tool.domain.clone()
    }
}

/// Resolves `RootAccount.domain`.
struct RootAccountDomainResolver;

impl VariableResolver for RootAccountDomainResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        Some(expansion.root_account.domain.clone())
    }
}

/// Resolves `Session.id`.
struct SessionIdResolver;

impl VariableResolver for SessionIdResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        expansion.session_id.as_ref().map(ToString::to_string)
    }
}

/// Resolves `Launch.linkText` from the in-progress launch.
struct LaunchLinkTextResolver;

impl VariableResolver for LaunchLinkTextResolver {
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String> {
        expansion.link_text.clone()
    }
}

// ============================================================================
// SECTION: Built-In Set
// ============================================================================

/// Returns the built-in resolver set keyed by variable name.
#[must_use]
pub fn builtin_resolvers() -> Vec<(&'static str, Box<dyn VariableResolver>)> {
    vec![
        ("Context.id", Box::new(ContextIdResolver) as Box<dyn VariableResolver>),
        ("Context.title", Box::new(ContextTitleResolver)),
        ("User.id", Box::new(UserIdResolver)),
        ("User.username", Box::new(UserUsernameResolver)),
        ("Tool.id", Box::new(ToolIdResolver)),
        ("Tool.domain", Box::new(ToolDomainResolver)),
        ("RootAccount.domain", Box::new(RootAccountDomainResolver)),
        ("Session.id", Box::new(SessionIdResolver)),
        ("Launch.linkText", Box::new(LaunchLinkTextResolver)),
    ]
}
