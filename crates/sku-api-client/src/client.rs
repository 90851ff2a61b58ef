// crates/sku-api-client/src/client.rs
// ============================================================================
// Module: SKU HTTP Client
// Description: Async client for the SKU collection and item endpoints.
// Purpose: Send single-shot requests and decode SKU payloads with transcripts.
// Dependencies: reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! [`SkuApiClient`] resolves every endpoint relative to a base URL such as
//! `https://host/dev/`. Requests are sent exactly once; there is no retry and
//! no default timeout. Raw exchanges are returned as [`ApiResponse`] so
//! callers can inspect status and content type, while the typed helpers fail
//! on non-success statuses and decode the body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

pub use reqwest::Method;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::ClientError;
use crate::audit::HttpAuditEvent;
use crate::audit::HttpAuditEventParams;
use crate::audit::HttpAuditSink;
use crate::audit::NoopAuditSink;
use crate::model::Sku;
use crate::model::SkuId;
use crate::model::SkuItem;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Collection path segment below the base URL.
const COLLECTION_SEGMENT: &str = "skus";
/// Maximum response body characters quoted in status errors.
const MAX_ERROR_BODY_CHARS: usize = 512;
/// Media type the service uses for every JSON payload.
const JSON_MEDIA_TYPE: &str = "application/json";

// ============================================================================
// SECTION: Types
// ============================================================================

/// One recorded request/response pair.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Per-client sequence number starting at 1.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Fully resolved request URL.
    pub url: String,
    /// JSON request body, if any.
    pub request: Option<Value>,
    /// Response status when a response was received.
    pub status: Option<u16>,
    /// Response body as JSON when it parses, otherwise as a string.
    pub response: Value,
    /// Transport error, if the exchange failed before a response.
    pub error: Option<String>,
}

/// Raw response captured by [`SkuApiClient::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP method of the request.
    pub method: String,
    /// Fully resolved request URL.
    pub url: String,
    /// Numeric HTTP status.
    pub status: u16,
    /// `Content-Type` header value, if present.
    pub content_type: Option<String>,
    /// Response body text.
    pub body: String,
}

impl ApiResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true when the media type is `application/json`.
    ///
    /// Parameters such as `charset` are ignored.
    #[must_use]
    pub fn has_json_content_type(&self) -> bool {
        self.content_type.as_deref().is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
        })
    }

    /// Converts a non-success response into [`ClientError::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] when the status is not 2xx.
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(ClientError::Status {
            method: self.method,
            url: self.url,
            status: self.status,
            body: self.body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        })
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self, context: &str) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| ClientError::Decode {
            context: context.to_string(),
            message: err.to_string(),
        })
    }
}

/// SKU HTTP client with transcript capture.
#[derive(Clone)]
pub struct SkuApiClient {
    /// Normalized base URL ending in `/`.
    base_url: Url,
    /// Underlying HTTP client.
    client: Client,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
    /// Destination for audit events.
    audit: Arc<dyn HttpAuditSink>,
}

impl SkuApiClient {
    /// Creates a client for the given base URL.
    ///
    /// `timeout` applies per request; `None` keeps the HTTP client default.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] for unusable URLs and
    /// [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self::new_with_client(base_url, client))
    }

    /// Creates a client from an existing reqwest client.
    #[must_use]
    pub fn new_with_client(base_url: Url, client: Client) -> Self {
        Self {
            base_url,
            client,
            transcript: Arc::new(Mutex::new(Vec::new())),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Routes audit events to `sink`.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn HttpAuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns the collection endpoint (`<base>/skus`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when the base cannot hold paths.
    pub fn collection_url(&self) -> Result<Url, ClientError> {
        self.endpoint(&[COLLECTION_SEGMENT])
    }

    /// Returns the item endpoint (`<base>/skus/{id}`), percent-encoding `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when the base cannot hold paths.
    pub fn item_url(&self, id: &SkuId) -> Result<Url, ClientError> {
        self.endpoint(&[COLLECTION_SEGMENT, id.as_str()])
    }

    /// Issues `GET skus` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response is received.
    pub async fn list_skus_response(&self) -> Result<ApiResponse, ClientError> {
        let url = self.collection_url()?;
        self.execute(Method::GET, url, None).await
    }

    /// Issues `GET skus` and decodes the array of records.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// when the body is not an array of complete records.
    pub async fn list_skus(&self) -> Result<Vec<Sku>, ClientError> {
        self.list_skus_response().await?.error_for_status()?.json("sku list")
    }

    /// Issues `GET skus/{id}` and decodes the lookup envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn get_sku(&self, id: &SkuId) -> Result<SkuItem, ClientError> {
        let url = self.item_url(id)?;
        self.execute(Method::GET, url, None)
            .await?
            .error_for_status()?
            .json(&format!("sku item {id}"))
    }

    /// Issues `POST skus` with the record as JSON (create or upsert).
    ///
    /// The response body is returned untouched; no schema is assumed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn create_sku(&self, sku: &Sku) -> Result<ApiResponse, ClientError> {
        let url = self.collection_url()?;
        let body = serde_json::to_value(sku).map_err(|err| ClientError::Decode {
            context: format!("sku {} request body", sku.sku),
            message: err.to_string(),
        })?;
        self.execute(Method::POST, url, Some(body)).await?.error_for_status()
    }

    /// Issues `DELETE skus/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn delete_sku(&self, id: &SkuId) -> Result<ApiResponse, ClientError> {
        let url = self.item_url(id)?;
        self.execute(Method::DELETE, url, None).await?.error_for_status()
    }

    /// Sends one request and records it, without interpreting the status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the request cannot be sent or
    /// the body cannot be read.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        let method_label = method.as_str().to_string();
        let url_label = url.to_string();
        let request_bytes = match &body {
            Some(value) => serde_json::to_vec(value).map_err(|err| ClientError::Decode {
                context: format!("{method_label} {url_label} request body"),
                message: err.to_string(),
            })?,
            None => Vec::new(),
        };
        let request_len = request_bytes.len();

        let mut request = self.client.request(method, url);
        if body.is_some() {
            request = request.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(request_bytes);
        }

        let started = Instant::now();
        let exchange = Exchange {
            method: method_label.clone(),
            url: url_label.clone(),
            request: body,
            request_bytes: request_len,
            started,
        };
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let message = err.to_string();
                self.record(exchange, None, String::new(), Some(message.clone()));
                return Err(ClientError::Transport {
                    method: method_label,
                    url: url_label,
                    message,
                });
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                let message = format!("reading response body: {err}");
                self.record(exchange, Some(status), String::new(), Some(message.clone()));
                return Err(ClientError::Transport {
                    method: method_label,
                    url: url_label,
                    message,
                });
            }
        };
        self.record(exchange, Some(status), text.clone(), None);

        Ok(ApiResponse {
            method: method_label,
            url: url_label,
            status,
            content_type,
            body: text,
        })
    }

    /// Resolves path segments below the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Appends a transcript entry and emits the matching audit event.
    fn record(&self, exchange: Exchange, status: Option<u16>, body: String, error: Option<String>) {
        let duration_ms = exchange.started.elapsed().as_millis();
        let response_bytes = body.len();
        let response =
            serde_json::from_str::<Value>(&body).unwrap_or_else(|_| Value::String(body));
        let sequence = {
            let Ok(mut guard) = self.transcript.lock() else {
                return;
            };
            let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
            guard.push(TranscriptEntry {
                sequence,
                method: exchange.method.clone(),
                url: exchange.url.clone(),
                request: exchange.request,
                status,
                response,
                error: error.clone(),
            });
            sequence
        };
        self.audit.record(&HttpAuditEvent::new(HttpAuditEventParams {
            sequence,
            method: exchange.method,
            url: exchange.url,
            status,
            request_bytes: exchange.request_bytes,
            response_bytes,
            duration_ms,
            error,
        }));
    }
}

/// Request metadata carried from send to record.
struct Exchange {
    /// HTTP method.
    method: String,
    /// Fully resolved request URL.
    url: String,
    /// JSON request body, if any.
    request: Option<Value>,
    /// Serialized request size.
    request_bytes: usize,
    /// Send timestamp.
    started: Instant,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a base URL and ensures its path ends with `/`.
fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|err| ClientError::InvalidBaseUrl(format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl(format!("{raw}: scheme must be http or https")));
    }
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(format!("{raw}: url cannot hold paths")));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
