// lti-launch-http/src/respond.rs
// ============================================================================
// Module: Error Responder
// Description: Content-negotiated HTTP responses for domain errors.
// Purpose: Map error kinds onto fixed statuses and localized bodies.
// Dependencies: lti-launch-core, axum, serde
// ============================================================================

//! ## Overview
//! Every domain error is recovered at the request boundary and converted
//! here. JSON requests receive a structured `{"errors": [...]}` body; HTML
//! and any other request type receive a plain-text message with the same
//! status. Status codes are fixed per error kind and messages come from the
//! i18n catalog with a static fallback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::ACCEPT;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use thiserror::Error;

use crate::i18n::MessageArg;
use crate::i18n::translate_or_fallback;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Domain errors recovered at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A launch was requested for a message type outside the supported set.
    #[error("unsupported message type: {0}")]
    UnsupportedMessageType(String),
    /// The caller lacks the rights the operation requires.
    #[error("missing required permission")]
    MissingRequiredPermission,
    /// A referenced record does not exist; carries the resource label.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A group submission has no original-submission representative.
    #[error("groupmate submission not found")]
    MissingGroupmateSubmission,
    /// An unexpected collaborator failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the fixed HTTP status for this error kind.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedMessageType(_) => StatusCode::BAD_REQUEST,
            Self::MissingRequiredPermission => StatusCode::FORBIDDEN,
            Self::NotFound(_) | Self::MissingGroupmateSubmission => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the stable error code reported in JSON bodies.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedMessageType(_) => "unsupported_message_type",
            Self::MissingRequiredPermission => "missing_required_permission",
            Self::NotFound(_) => "not_found",
            Self::MissingGroupmateSubmission => "groupmate_submission_not_found",
            Self::Internal(_) => "internal_server_error",
        }
    }

    /// Returns the localized user-facing message for this error kind.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnsupportedMessageType(message_type) => translate_or_fallback(
                "error.unsupported_message_type",
                vec![MessageArg::new("message_type", message_type.clone())],
            ),
            Self::MissingRequiredPermission => {
                translate_or_fallback("error.missing_required_permission", Vec::new())
            }
            Self::NotFound(resource) => translate_or_fallback(
                "error.not_found",
                vec![MessageArg::new("resource", *resource)],
            ),
            Self::MissingGroupmateSubmission => {
                translate_or_fallback("error.groupmate_submission_not_found", Vec::new())
            }
            Self::Internal(_) => translate_or_fallback("error.internal", Vec::new()),
        }
    }
}

// ============================================================================
// SECTION: Content Negotiation
// ============================================================================

/// Response formats negotiated from the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Structured JSON error body.
    Json,
    /// HTML request; receives the plain-text message.
    Html,
    /// Catch-all plain-text fallback.
    Text,
}

impl ResponseFormat {
    /// Negotiates the response format from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let accept = headers.get(ACCEPT).and_then(|value| value.to_str().ok()).unwrap_or("");
        if accept.contains("application/json") {
            Self::Json
        } else if accept.contains("text/html") {
            Self::Html
        } else {
            Self::Text
        }
    }
}

// ============================================================================
// SECTION: Body Shapes
// ============================================================================

/// JSON error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Error details; always exactly one entry for these flows.
    errors: Vec<ErrorDetail>,
}

/// One structured error detail.
#[derive(Debug, Serialize)]
struct ErrorDetail {
    /// Localized user-facing message.
    message: String,
    /// Stable error code.
    error_code: &'static str,
    /// Resource label for not-found errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<&'static str>,
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a domain error as a content-negotiated response.
#[must_use]
pub fn render(error: &ApiError, format: ResponseFormat) -> Response {
    let status = error.status();
    match format {
        ResponseFormat::Json => {
            let resource = match error {
                ApiError::NotFound(resource) => Some(*resource),
                _ => None,
            };
            let body = ErrorBody {
                errors: vec![ErrorDetail {
                    message: error.message(),
                    error_code: error.error_code(),
                    resource,
                }],
            };
            (status, axum::Json(body)).into_response()
        }
        ResponseFormat::Html | ResponseFormat::Text => (status, error.message()).into_response(),
    }
}
