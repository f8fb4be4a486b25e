// lti-launch-http/src/lib.rs
// ============================================================================
// Module: LTI Launch HTTP Library
// Description: HTTP tier for launch orchestration and resubmission notices.
// Purpose: Expose the launch core over axum with negotiated error responses.
// Dependencies: lti-launch-core, lti-launch-expander, axum, tokio
// ============================================================================

//! ## Overview
//! The HTTP tier wires the launch core to the outside world: server
//! configuration, the reference adapter, audit sinks, content-negotiated
//! error responses, request-scoped submission resolution, and the axum
//! router for asset-processor endpoints. All user-facing error strings are
//! routed through the [`t!`](crate::t) catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapter;
pub mod audit;
pub mod config;
pub mod i18n;
pub mod resolve;
pub mod respond;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::ReferenceAdapterFactory;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use config::AuditTarget;
pub use config::ServerConfig;
pub use respond::ApiError;
pub use respond::ResponseFormat;
pub use server::AppState;
pub use server::LaunchServer;
pub use server::ServerError;
