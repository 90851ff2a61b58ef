// crates/sku-api-client/src/lib.rs
// ============================================================================
// Module: SKU API Client Library
// Description: Typed HTTP client for the SKU CRUD surface.
// Purpose: Issue SKU requests, decode responses, and record every exchange.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! This crate wraps the SKU service's HTTP surface (`skus` and `skus/{id}`)
//! behind a small async client. Responses decode into [`Sku`] and
//! [`SkuItem`]; a missing record is `SkuItem { item: None }` rather than an
//! error because the service answers lookups for unknown ids with a success
//! status and an empty payload.
//!
//! Every exchange is appended to an in-memory transcript and emitted as a
//! JSON-line [`HttpAuditEvent`] through the configured [`HttpAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod client;
pub mod model;


// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised by [`SkuApiClient`].
///
/// # Invariants
/// - [`ClientError::Status`] always carries the numeric HTTP status.
/// - Variants carry human-readable context for test failure messages.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL could not be parsed or uses an unsupported scheme.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// HTTP client construction failed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// Request could not be sent or the response could not be read.
    #[error("{method} {url} failed: {message}")]
    Transport {
        /// HTTP method of the failed request.
        method: String,
        /// Fully resolved request URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },
    /// Service answered with a non-success status.
    #[error("{method} {url} returned status code {status}: {body}")]
    Status {
        /// HTTP method of the failed request.
        method: String,
        /// Fully resolved request URL.
        url: String,
        /// Numeric HTTP status code.
        status: u16,
        /// Response body (truncated).
        body: String,
    },
    /// Response body did not decode into the expected shape.
    #[error("decode {context}: {message}")]
    Decode {
        /// What was being decoded.
        context: String,
        /// Decoder error message.
        message: String,
    },
}

impl ClientError {
    /// Returns the HTTP status code when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::HttpAuditEvent;
pub use audit::HttpAuditSink;
pub use audit::HttpOutcome;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use client::ApiResponse;
pub use client::Method;
pub use client::SkuApiClient;
pub use client::TranscriptEntry;
pub use model::Sku;
pub use model::SkuId;
pub use model::SkuItem;
