// crates/sku-api-client/src/audit.rs
// ============================================================================
// Module: HTTP Exchange Audit Logging
// Description: Structured audit events for SKU API requests.
// Purpose: Emit JSON-line exchange logs without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each request issued by [`crate::SkuApiClient`] produces one
//! [`HttpAuditEvent`]. Sinks decide where the JSON line goes; the default
//! sink discards it so library users opt in to output explicitly.

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

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome classification for an HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpOutcome {
    /// 2xx response.
    Success,
    /// Response received with a non-success status.
    HttpError,
    /// No response was received.
    TransportError,
}

/// HTTP exchange audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct HttpAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Per-client request sequence number.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Fully resolved request URL.
    pub url: String,
    /// Response status when a response was received.
    pub status: Option<u16>,
    /// Exchange outcome.
    pub outcome: HttpOutcome,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock duration of the exchange.
    pub duration_ms: u128,
    /// Transport error message, if any.
    pub error: Option<String>,
}

/// Inputs required to construct an audit event.
pub struct HttpAuditEventParams {
    /// Per-client request sequence number.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Fully resolved request URL.
    pub url: String,
    /// Response status when a response was received.
    pub status: Option<u16>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock duration of the exchange.
    pub duration_ms: u128,
    /// Transport error message, if any.
    pub error: Option<String>,
}

impl HttpAuditEvent {
    /// Creates a new audit event with a consistent timestamp and outcome.
    #[must_use]
    pub fn new(params: HttpAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let outcome = match params.status {
            Some(status) if (200..300).contains(&status) => HttpOutcome::Success,
            Some(_) => HttpOutcome::HttpError,
            None => HttpOutcome::TransportError,
        };
        Self {
            event: "sku_api_request",
            timestamp_ms,
            sequence: params.sequence,
            method: params.method,
            url: params.url,
            status: params.status,
            outcome,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
            duration_ms: params.duration_ms,
            error: params.error,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for HTTP exchange events.
pub trait HttpAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &HttpAuditEvent);
}

/// Audit sink that drops every event.
pub struct NoopAuditSink;

impl HttpAuditSink for NoopAuditSink {
    fn record(&self, _event: &HttpAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl HttpAuditSink for StderrAuditSink {
    fn record(&self, event: &HttpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
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
}

impl HttpAuditSink for FileAuditSink {
    fn record(&self, event: &HttpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
