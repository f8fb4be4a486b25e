// lti-launch-expander/src/tests.rs
// ============================================================================
// Module: Expander Tests
// Description: Tests for registry-based variable expansion.
// Purpose: Ensure substitution, override precedence, and policy enforcement.
// Dependencies: lti-launch-core
// ============================================================================
//! Tests for the expander registry.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use lti_launch_core::Context;
use lti_launch_core::ContextId;
use lti_launch_core::ContextKind;
use lti_launch_core::ExpansionContext;
use lti_launch_core::LaunchParams;
use lti_launch_core::RootAccount;
use lti_launch_core::Tool;
use lti_launch_core::ToolId;
use lti_launch_core::User;
use lti_launch_core::UserId;
use lti_launch_core::VariableExpander;
use serde_json::Value;

use crate::registry::ExpanderRegistry;
use crate::registry::ExpansionAccessPolicy;

fn sample_expansion() -> ExpansionContext {
    ExpansionContext {
        root_account: RootAccount {
            domain: "lms.example.edu".to_string(),
        },
        context: Context {
            id: ContextId::from_raw(11).expect("context id"),
            kind: ContextKind::Course,
            title: "Composition 101".to_string(),
        },
        user: User {
            id: UserId::from_raw(42).expect("user id"),
            name: "Rosa Teacher".to_string(),
            pseudonym: Some("rosa".to_string()),
        },
        tool: Tool {
            id: ToolId::from_raw(7).expect("tool id"),
            label: "Essay Review".to_string(),
            domain: Some("tool.example.com".to_string()),
            url: "https://tool.example.com".to_string(),
        },
        session_id: Some("session-abc".into()),
        link_text: Some("Essay Review".to_string()),
        overrides: BTreeMap::new(),
    }
}

fn params_with(claim: &str, value: &str) -> LaunchParams {
    let mut params = LaunchParams::new();
    params.insert(claim, value);
    params
}

#[test]
fn known_variables_are_substituted() {
    let registry = ExpanderRegistry::with_builtin_resolvers();
    let mut params = params_with("custom_course_id", "$Context.id");
    params.insert("custom_user_id", "$User.id");
    params.insert("custom_domain", "$RootAccount.domain");

    registry.expand(&sample_expansion(), &mut params);

    assert_eq!(params.get("custom_course_id"), Some(&Value::String("11".to_string())));
    assert_eq!(params.get("custom_user_id"), Some(&Value::String("42".to_string())));
    assert_eq!(
        params.get("custom_domain"),
        Some(&Value::String("lms.example.edu".to_string()))
    );
}

#[test]
fn unknown_variables_are_left_unexpanded() {
    let registry = ExpanderRegistry::with_builtin_resolvers();
    let mut params = params_with("custom_unknown", "$Does.notExist");

    registry.expand(&sample_expansion(), &mut params);

    assert_eq!(
        params.get("custom_unknown"),
        Some(&Value::String("$Does.notExist".to_string()))
    );
}

#[test]
fn non_placeholder_values_are_untouched() {
    let registry = ExpanderRegistry::with_builtin_resolvers();
    let mut params = params_with("custom_static", "plain value");
    params.insert("custom_number", 7);

    registry.expand(&sample_expansion(), &mut params);

    assert_eq!(params.get("custom_static"), Some(&Value::String("plain value".to_string())));
    assert_eq!(params.get("custom_number"), Some(&Value::from(7)));
}

#[test]
fn overrides_win_over_builtin_resolvers() {
    let registry = ExpanderRegistry::with_builtin_resolvers();
    let mut expansion = sample_expansion();
    expansion
        .overrides
        .insert("Context.title".to_string(), "Override Title".to_string());
    let mut params = params_with("custom_title", "$Context.title");

    registry.expand(&expansion, &mut params);

    assert_eq!(
        params.get("custom_title"),
        Some(&Value::String("Override Title".to_string()))
    );
}

#[test]
fn denylisted_variables_are_not_expanded() {
    let mut registry = ExpanderRegistry::new(ExpansionAccessPolicy {
        allowlist: None,
        denylist: BTreeSet::from(["User.id".to_string()]),
    });
    registry.register_builtin_resolvers();
    let mut params = params_with("custom_user_id", "$User.id");

    registry.expand(&sample_expansion(), &mut params);

    assert_eq!(params.get("custom_user_id"), Some(&Value::String("$User.id".to_string())));
    assert!(!registry.policy().is_allowed("User.id"));
}

#[test]
fn missing_backing_state_leaves_placeholder() {
    let registry = ExpanderRegistry::with_builtin_resolvers();
    let mut expansion = sample_expansion();
    expansion.user.pseudonym = None;
    let mut params = params_with("custom_username", "$User.username");

    registry.expand(&expansion, &mut params);

    assert_eq!(
        params.get("custom_username"),
        Some(&Value::String("$User.username".to_string()))
    );
}
