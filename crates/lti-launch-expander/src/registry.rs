// lti-launch-expander/src/registry.rs
// ============================================================================
// Module: Expander Registry
// Description: Registry for built-in and custom variable resolvers.
// Purpose: Route placeholder resolution by variable name with policy checks.
// Dependencies: lti-launch-core
// ============================================================================

//! ## Overview
//! The registry resolves placeholder variables by name and enforces
//! allowlist and denylist policies. It implements the core
//! [`lti_launch_core::VariableExpander`] interface so the orchestrator can
//! hand it to adapters without knowing which resolvers are installed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use lti_launch_core::ExpansionContext;
use lti_launch_core::LaunchParams;
use lti_launch_core::VariableExpander;
use serde_json::Value;

use crate::variables::builtin_resolvers;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves one named variable against the expansion context.
pub trait VariableResolver: Send + Sync {
    /// Returns the resolved value, or `None` when the context lacks it.
    fn resolve(&self, expansion: &ExpansionContext) -> Option<String>;
}

// ============================================================================
// SECTION: Access Policy
// ============================================================================

/// Access policy controlling which variables may be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionAccessPolicy {
    /// Optional allowlist of variable names.
    pub allowlist: Option<BTreeSet<String>>,
    /// Explicit denylist of variable names.
    pub denylist: BTreeSet<String>,
}

impl ExpansionAccessPolicy {
    /// Returns a policy that permits all variables.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            allowlist: None,
            denylist: BTreeSet::new(),
        }
    }

    /// Returns true when the variable is allowed by policy.
    #[must_use]
    pub fn is_allowed(&self, variable: &str) -> bool {
        if self.denylist.contains(variable) {
            return false;
        }
        if let Some(allowlist) = &self.allowlist {
            return allowlist.contains(variable);
        }
        true
    }
}

impl Default for ExpansionAccessPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

// ============================================================================
// SECTION: Expander Registry
// ============================================================================

/// Variable resolver registry with policy enforcement.
pub struct ExpanderRegistry {
    /// Resolver implementations keyed by variable name.
    resolvers: BTreeMap<String, Box<dyn VariableResolver>>,
    /// Access control policy for variable usage.
    policy: ExpansionAccessPolicy,
}

impl ExpanderRegistry {
    /// Creates a new registry with the provided policy.
    #[must_use]
    pub fn new(policy: ExpansionAccessPolicy) -> Self {
        Self {
            resolvers: BTreeMap::new(),
            policy,
        }
    }

    /// Creates a registry with built-in resolvers registered.
    #[must_use]
    pub fn with_builtin_resolvers() -> Self {
        let mut registry = Self::new(ExpansionAccessPolicy::default());
        registry.register_builtin_resolvers();
        registry
    }

    /// Registers a resolver under the given variable name.
    pub fn register_resolver(
        &mut self,
        variable: impl Into<String>,
        resolver: impl VariableResolver + 'static,
    ) {
        self.resolvers.insert(variable.into(), Box::new(resolver));
    }

    /// Registers the built-in resolver set.
    pub fn register_builtin_resolvers(&mut self) {
        for (variable, resolver) in builtin_resolvers() {
            self.resolvers.insert(variable.to_string(), resolver);
        }
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> &ExpansionAccessPolicy {
        &self.policy
    }

    /// Resolves one placeholder, honoring overrides and policy.
    fn resolve(&self, variable: &str, expansion: &ExpansionContext) -> Option<String> {
        if !self.policy.is_allowed(variable) {
            return None;
        }
        if let Some(value) = expansion.overrides.get(variable) {
            return Some(value.clone());
        }
        self.resolvers.get(variable).and_then(|resolver| resolver.resolve(expansion))
    }
}

impl VariableExpander for ExpanderRegistry {
    fn expand(&self, expansion: &ExpansionContext, params: &mut LaunchParams) {
        for (_, value) in params.iter_mut() {
            let Some(placeholder) = value.as_str().and_then(|raw| raw.strip_prefix('$')) else {
                continue;
            };
            if let Some(resolved) = self.resolve(placeholder, expansion) {
                *value = Value::String(resolved);
            }
        }
    }
}
