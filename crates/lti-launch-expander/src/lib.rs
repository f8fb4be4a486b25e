// lti-launch-expander/src/lib.rs
// ============================================================================
// Module: LTI Launch Variable Expander
// Description: Built-in variable expander with a policy-checked registry.
// Purpose: Resolve launch placeholder variables against request state.
// Dependencies: lti-launch-core
// ============================================================================

//! ## Overview
//! The expander substitutes `$Variable.name` placeholders in launch payload
//! values against the request's expansion context. Resolution is routed
//! through a registry keyed by variable name with allowlist and denylist
//! policy enforcement. Expansion is best effort: unknown or blocked
//! variables are left unexpanded and never fail a launch.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry;
pub mod variables;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use registry::ExpanderRegistry;
pub use registry::ExpansionAccessPolicy;
pub use registry::VariableResolver;
