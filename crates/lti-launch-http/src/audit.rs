// lti-launch-http/src/audit.rs
// ============================================================================
// Module: Launch Audit Sinks
// Description: JSON-line audit sinks for launch events.
// Purpose: Emit launch audit records without hard logging dependencies.
// Dependencies: lti-launch-core, serde_json
// ============================================================================

//! ## Overview
//! Sinks implement the core [`LaunchAuditSink`] interface and write one JSON
//! line per record. They are intentionally lightweight so deployments can
//! route events to their preferred logging pipeline without redesign.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use lti_launch_core::LaunchAuditRecord;
use lti_launch_core::LaunchAuditSink;

// ============================================================================
// SECTION: Stderr Sink
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl LaunchAuditSink for StderrAuditSink {
    fn record(&self, record: &LaunchAuditRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

// ============================================================================
// SECTION: File Sink
// ============================================================================

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LaunchAuditSink for FileAuditSink {
    fn record(&self, record: &LaunchAuditRecord) {
        if let Ok(payload) = serde_json::to_string(record)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Noop Sink
// ============================================================================

/// No-op audit sink.
pub struct NoopAuditSink;

impl LaunchAuditSink for NoopAuditSink {
    fn record(&self, _record: &LaunchAuditRecord) {}
}
