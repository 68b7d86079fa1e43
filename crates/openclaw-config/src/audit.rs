// crates/openclaw-config/src/audit.rs
// ============================================================================
// Module: Admin Audit Logging
// Description: Structured audit events for gateway config operations.
// Purpose: Emit JSON-line audit records without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each administrative operation records one audit event. Events are plain
//! serializable structs; sinks decide where the JSON lines go (stderr, an
//! append-only file, or nowhere). Token values never appear in events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::normalize::NormalizeReport;
use crate::templates::TemplateKind;
use crate::token::TokenStatus;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event for a gateway auth normalization.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayAuthAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Config document path.
    pub path: String,
    /// Edits applied or pending.
    pub report: NormalizeReport,
    /// Whether the document was written.
    pub written: bool,
}

/// Audit event for a token status check.
#[derive(Debug, Clone, Serialize)]
pub struct TokenStatusAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Env file path.
    pub path: String,
    /// Whether the env file exists.
    pub file_present: bool,
    /// Reported status.
    pub status: TokenStatus,
}

/// Audit event for one template validation.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Template checked.
    pub template: TemplateKind,
    /// Number of failed rules.
    pub violations: usize,
}

impl GatewayAuthAuditEvent {
    /// Creates a normalization event with a consistent timestamp.
    #[must_use]
    pub fn new(path: &Path, report: NormalizeReport, written: bool) -> Self {
        Self {
            event: "gateway_auth_normalized",
            timestamp_ms: now_ms(),
            path: path.display().to_string(),
            report,
            written,
        }
    }
}

impl TokenStatusAuditEvent {
    /// Creates a token status event with a consistent timestamp.
    #[must_use]
    pub fn new(path: &Path, file_present: bool, status: TokenStatus) -> Self {
        Self {
            event: "token_status_checked",
            timestamp_ms: now_ms(),
            path: path.display().to_string(),
            file_present,
            status,
        }
    }
}

impl TemplateAuditEvent {
    /// Creates a template validation event with a consistent timestamp.
    #[must_use]
    pub fn new(template: TemplateKind, violations: usize) -> Self {
        Self {
            event: "templates_validated",
            timestamp_ms: now_ms(),
            template,
            violations,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for admin operations.
pub trait AuditSink: Send + Sync {
    /// Record a gateway auth normalization.
    fn record_gateway_auth(&self, event: &GatewayAuthAuditEvent);

    /// Record a token status check.
    fn record_token_status(&self, _event: &TokenStatusAuditEvent) {}

    /// Record a template validation.
    fn record_template(&self, _event: &TemplateAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_gateway_auth(&self, event: &GatewayAuthAuditEvent) {
        write_json_line(&mut io::stderr(), event);
    }

    fn record_token_status(&self, event: &TokenStatusAuditEvent) {
        write_json_line(&mut io::stderr(), event);
    }

    fn record_template(&self, event: &TemplateAuditEvent) {
        write_json_line(&mut io::stderr(), event);
    }
}

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

    /// Appends one event under the file lock.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(mut file) = self.file.lock() {
            write_json_line(&mut *file, event);
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_gateway_auth(&self, event: &GatewayAuthAuditEvent) {
        self.append(event);
    }

    fn record_token_status(&self, event: &TokenStatusAuditEvent) {
        self.append(event);
    }

    fn record_template(&self, event: &TemplateAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_gateway_auth(&self, _event: &GatewayAuthAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Milliseconds since the Unix epoch (zero if the clock is before it).
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Serializes `event` as one line; failures are dropped.
fn write_json_line<W: Write + ?Sized, T: Serialize>(out: &mut W, event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(out, "{payload}");
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
