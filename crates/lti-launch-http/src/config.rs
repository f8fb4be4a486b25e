// lti-launch-http/src/config.rs
// ============================================================================
// Module: Server Configuration
// Description: Launch server configuration with validation.
// Purpose: Describe bind, body-limit, and audit settings declaratively.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Server configuration is loaded from TOML and validated before the server
//! starts. Validation fails closed: an empty bind address or a zero body
//! limit is rejected rather than defaulted at serve time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default loopback bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default request body limit in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default request body limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum AuditTarget {
    /// JSON lines to stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File {
        /// Audit log path.
        path: PathBuf,
    },
    /// Discard audit records.
    Noop,
}

/// Launch server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Canonical root-account domain; empty falls back to the request host.
    #[serde(default)]
    pub root_account_domain: String,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditTarget,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            root_account_domain: String::new(),
            audit: AuditTarget::default(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parsing failed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A field failed validation.
    #[error("config validation error: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl ServerConfig {
    /// Parses and validates configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for empty binds, zero body limits,
    /// or an empty audit file path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("bind address must not be empty".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be positive".to_string()));
        }
        if let AuditTarget::File {
            path,
        } = &self.audit
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("audit file path must not be empty".to_string()));
        }
        Ok(())
    }
}
