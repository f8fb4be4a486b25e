// lti-launch-http/src/server.rs
// ============================================================================
// Module: Launch Server
// Description: Axum server exposing asset-processor launch endpoints.
// Purpose: Route launch and resubmission requests through the launch core.
// Dependencies: lti-launch-core, axum, tokio
// ============================================================================

//! ## Overview
//! The launch server exposes two endpoints per asset processor: a launch
//! endpoint returning the assembled payload and a resubmission notice
//! endpoint returning `204 No Content`. Caller identity arrives on trusted
//! proxy headers and is resolved against the user repository; requests
//! without a resolvable caller are rejected with `403`. All domain errors
//! are rendered through the content-negotiated responder.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::HOST;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use lti_launch_core::AdapterOptions;
use lti_launch_core::AssetProcessorId;
use lti_launch_core::AssetProcessorStore;
use lti_launch_core::ContextStore;
use lti_launch_core::DispatchError;
use lti_launch_core::LaunchAuditSink;
use lti_launch_core::LaunchOrchestrator;
use lti_launch_core::LaunchRequest;
use lti_launch_core::LogLaunchType;
use lti_launch_core::MessageType;
use lti_launch_core::OrchestrationError;
use lti_launch_core::PermissionChecker;
use lti_launch_core::ResubmissionNotifier;
use lti_launch_core::Right;
use lti_launch_core::RootAccount;
use lti_launch_core::SessionId;
use lti_launch_core::SubmissionStore;
use lti_launch_core::ToolStore;
use lti_launch_core::User;
use lti_launch_core::UserId;
use lti_launch_core::UserStore;
use serde::Deserialize;
use thiserror::Error;

use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::config::AuditTarget;
use crate::config::ServerConfig;
use crate::resolve::ResubmissionResolution;
use crate::resolve::ResubmitParams;
use crate::resolve::notify_error;
use crate::respond::ApiError;
use crate::respond::ResponseFormat;
use crate::respond::render;

// ============================================================================
// SECTION: Headers
// ============================================================================

/// Trusted proxy header carrying the authenticated caller identifier.
const USER_HEADER: &str = "x-lms-user-id";

/// Trusted proxy header carrying the caller's session identifier.
const SESSION_HEADER: &str = "x-lms-session-id";

/// Rights that gate grade-scoped launches and resubmission notices.
const GRADE_RIGHTS: &[Right] = &[Right::ViewAllGrades, Right::ManageGrades];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Launch server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server configuration is invalid.
    #[error("server configuration error: {0}")]
    Config(String),
    /// The transport failed to start or serve.
    #[error("server transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared state for all request handlers.
pub struct AppState {
    /// Tool repository.
    pub tools: Arc<dyn ToolStore>,
    /// User repository backing caller resolution.
    pub users: Arc<dyn UserStore>,
    /// Asset processor repository.
    pub asset_processors: Arc<dyn AssetProcessorStore>,
    /// Launch context repository.
    pub contexts: Arc<dyn ContextStore>,
    /// Submission repository.
    pub submissions: Arc<dyn SubmissionStore>,
    /// Permission grant checker.
    pub permissions: Arc<dyn PermissionChecker>,
    /// Resubmission notice channel.
    pub notifier: Arc<dyn ResubmissionNotifier>,
    /// Launch orchestrator.
    pub orchestrator: Arc<LaunchOrchestrator>,
    /// Root account for instance-wide defaults.
    pub root_account: RootAccount,
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Launch server bound to a configuration and shared state.
pub struct LaunchServer {
    /// Validated server configuration.
    config: ServerConfig,
    /// Shared handler state.
    state: Arc<AppState>,
}

impl LaunchServer {
    /// Builds a new launch server from configuration and state.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when the configuration is invalid.
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        Ok(Self {
            config,
            state,
        })
    }

    /// Serves requests until the transport fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the bind address is invalid or the
    /// listener fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .bind
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let app = router(Arc::clone(&self.state), self.config.max_body_bytes);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns [`ServerError::Config`] when the audit log file cannot be opened.
pub fn build_audit_sink(target: &AuditTarget) -> Result<Arc<dyn LaunchAuditSink>, ServerError> {
    match target {
        AuditTarget::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditTarget::File {
            path,
        } => {
            let sink = FileAuditSink::new(path)
                .map_err(|err| ServerError::Config(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        AuditTarget::Noop => Ok(Arc::new(NoopAuditSink)),
    }
}

/// Builds the router for the asset-processor endpoints.
#[must_use]
pub fn router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/lti/asset_processors/{asset_processor_id}/launch", post(handle_launch))
        .route(
            "/lti/asset_processors/{asset_processor_id}/resubmit_notice",
            post(handle_resubmit_notice),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Launch request query parameters.
#[derive(Debug, Deserialize)]
struct LaunchQuery {
    /// Message type identifier to dispatch.
    message_type: String,
    /// Optional return URL handed to the adapter.
    #[serde(default)]
    return_url: Option<String>,
}

/// Resubmission notice query parameters.
#[derive(Debug, Deserialize)]
struct ResubmitQuery {
    /// Student identifier; numeric or `anonymous:<id>`.
    #[serde(default)]
    student_id: Option<String>,
    /// Optional attempt selector; parsed permissively.
    #[serde(default)]
    attempt: Option<String>,
}

/// Resubmission notice JSON body; an alternative to the query parameters.
#[derive(Debug, Deserialize)]
struct ResubmitBody {
    /// Student identifier; numeric or `anonymous:<id>`.
    #[serde(default)]
    student_id: Option<String>,
    /// Optional attempt selector; parsed permissively.
    #[serde(default)]
    attempt: Option<String>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles asset-processor launch requests.
async fn handle_launch(
    State(state): State<Arc<AppState>>,
    Path(asset_processor_id): Path<u64>,
    Query(query): Query<LaunchQuery>,
    headers: HeaderMap,
) -> Response {
    let format = ResponseFormat::from_headers(&headers);
    match launch(&state, asset_processor_id, &query, &headers) {
        Ok(launch) => (StatusCode::OK, axum::Json(launch)).into_response(),
        Err(err) => render(&err, format),
    }
}

/// Handles resubmission notice requests.
async fn handle_resubmit_notice(
    State(state): State<Arc<AppState>>,
    Path(asset_processor_id): Path<u64>,
    Query(query): Query<ResubmitQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let format = ResponseFormat::from_headers(&headers);
    match resubmit_notice(&state, asset_processor_id, &headers, query, &body) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => render(&err, format),
    }
}

/// Runs the launch flow for one request.
fn launch(
    state: &Arc<AppState>,
    raw_id: u64,
    query: &LaunchQuery,
    headers: &HeaderMap,
) -> Result<lti_launch_core::Launch, ApiError> {
    let asset_processor_id =
        AssetProcessorId::from_raw(raw_id).ok_or(ApiError::NotFound("asset processor"))?;
    let caller = resolve_caller(state, headers)?;

    let message_type: MessageType = query
        .message_type
        .parse()
        .map_err(|_| ApiError::UnsupportedMessageType(query.message_type.clone()))?;

    let processor = state
        .asset_processors
        .find(asset_processor_id)
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or(ApiError::NotFound("asset processor"))?;
    let tool = state
        .tools
        .find(processor.tool_id)
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or(ApiError::NotFound("tool"))?;
    let context = state
        .contexts
        .find(processor.context_id)
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or(ApiError::NotFound("context"))?;

    // EULA launches are available to any resolvable caller.
    if message_type != MessageType::Eula
        && !state.permissions.grants_any_right(caller.id, context.id, GRADE_RIGHTS)
    {
        return Err(ApiError::MissingRequiredPermission);
    }

    let request_host = request_host(headers, &state.root_account.domain);
    let return_url = query
        .return_url
        .clone()
        .unwrap_or_else(|| format!("https://{request_host}/lti/return"));

    let request = LaunchRequest {
        tool,
        context,
        user: caller,
        root_account: state.root_account.clone(),
        request_host,
        session_id: session_id(headers),
        message_type,
        return_url,
        adapter_overrides: AdapterOptions::default(),
        expander_overrides: BTreeMap::new(),
        log_launch_type: LogLaunchType::DirectLink,
    };

    state.orchestrator.create_and_log_launch(request).map_err(|err| match err {
        OrchestrationError::Dispatch(DispatchError::UnsupportedMessageType(raw)) => {
            ApiError::UnsupportedMessageType(raw)
        }
        OrchestrationError::Dispatch(other) => ApiError::Internal(other.to_string()),
    })
}

/// Runs the resubmission notice flow for one request.
fn resubmit_notice(
    state: &Arc<AppState>,
    raw_id: u64,
    headers: &HeaderMap,
    query: ResubmitQuery,
    body: &[u8],
) -> Result<(), ApiError> {
    let asset_processor_id =
        AssetProcessorId::from_raw(raw_id).ok_or(ApiError::NotFound("asset processor"))?;
    let caller = resolve_caller(state, headers)?;
    let params = resubmit_params(query, body)?;

    let resolution = ResubmissionResolution::new(state, asset_processor_id, caller.id, params);
    let resolved = resolution.resolve()?;

    state
        .notifier
        .notify(&resolved.processor, &resolved.submission, &resolved.version)
        .map_err(notify_error)
}

/// Merges query parameters with the optional JSON body; query values win.
fn resubmit_params(query: ResubmitQuery, body: &[u8]) -> Result<ResubmitParams, ApiError> {
    let body: Option<ResubmitBody> =
        if body.is_empty() { None } else { serde_json::from_slice(body).ok() };
    let student_id = query
        .student_id
        .or_else(|| body.as_ref().and_then(|body| body.student_id.clone()))
        .ok_or(ApiError::NotFound("submission"))?;
    let attempt = query.attempt.or_else(|| body.and_then(|body| body.attempt));
    Ok(ResubmitParams {
        student_id,
        attempt,
    })
}

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Resolves the caller from the trusted identity header; fails closed.
fn resolve_caller(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let raw = headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingRequiredPermission)?;
    let id = raw
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(UserId::from_raw)
        .ok_or(ApiError::MissingRequiredPermission)?;
    state
        .users
        .find(id)
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or(ApiError::MissingRequiredPermission)
}

/// Reads the session identifier header when present.
fn session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(SessionId::new)
}

/// Reads the request host, falling back to the root-account domain.
fn request_host(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map_or_else(|| fallback.to_string(), str::to_string)
}
