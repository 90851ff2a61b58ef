// system-tests/src/stub.rs
// ============================================================================
// Module: SKU Stub Service
// Description: In-memory stand-in for the SKU HTTP service.
// Purpose: Let contract suites run offline and exercise client error paths.
// Dependencies: axum, sku-api-client, tokio
// ============================================================================

//! ## Overview
//! The stub mounts the SKU surface under `/dev/` the way the API gateway
//! stage does. `POST skus` upserts by id, `DELETE skus/{id}` succeeds whether
//! or not the record exists, and lookups of unknown ids answer `200 {}`.
//! Every request is captured, and a response override can force any status
//! or body to drive failure-path tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::net::SocketAddr;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use serde::Serialize;
use serde_json::json;
use sku_api_client::Sku;
use sku_api_client::SkuId;
use sku_api_client::SkuItem;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Stage prefix the gateway mounts the service under.
pub const STAGE_PREFIX: &str = "/dev";

/// Recorded request metadata for stub calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubRequest {
    /// HTTP method.
    pub method: String,
    /// Request path including the stage prefix.
    pub path: String,
}

/// Canned response returned instead of the normal handler result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubOverride {
    /// Status code to answer with.
    pub status: u16,
    /// `Content-Type` header value.
    pub content_type: String,
    /// Raw response body.
    pub body: String,
}

impl StubOverride {
    /// Gateway-style JSON error with the given status.
    #[must_use]
    pub fn error(status: u16) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: json!({"message": "Internal server error"}).to_string(),
        }
    }

    /// Successful response carrying an arbitrary body.
    #[must_use]
    pub fn ok_raw(content_type: &str, body: &str) -> Self {
        Self {
            status: 200,
            content_type: content_type.to_string(),
            body: body.to_string(),
        }
    }
}

/// Mutable stub state behind the shared lock.
#[derive(Default)]
struct CatalogState {
    /// Stored records keyed by id.
    records: BTreeMap<SkuId, Sku>,
    /// Active response override.
    override_response: Option<StubOverride>,
    /// Captured requests in arrival order.
    requests: Vec<StubRequest>,
}

/// Shared in-memory SKU catalog served by the stub.
#[derive(Clone, Default)]
pub struct StubCatalog {
    /// Shared state.
    state: Arc<Mutex<CatalogState>>,
}

impl StubCatalog {
    /// Creates a catalog holding `seed`.
    #[must_use]
    pub fn new(seed: Vec<Sku>) -> Self {
        let records = seed.into_iter().map(|sku| (sku.sku.clone(), sku)).collect();
        Self {
            state: Arc::new(Mutex::new(CatalogState {
                records,
                ..CatalogState::default()
            })),
        }
    }

    /// Builds the axum router for this catalog.
    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/skus", get(list_skus).post(create_sku))
            .route("/skus/{id}", get(get_sku).delete(delete_sku));
        Router::new().nest(STAGE_PREFIX, routes).with_state(self.clone())
    }

    /// Serves the catalog on `listener` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error when the server fails while accepting connections.
    pub async fn serve(
        &self,
        listener: tokio::net::TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        axum::serve(listener, self.router()).with_graceful_shutdown(shutdown).await
    }

    /// Returns a snapshot of the stored records in id order.
    #[must_use]
    pub fn records(&self) -> Vec<Sku> {
        self.state
            .lock()
            .map_or_else(|_| Vec::new(), |state| state.records.values().cloned().collect())
    }

    /// Returns captured requests.
    #[must_use]
    pub fn requests(&self) -> Vec<StubRequest> {
        self.state.lock().map_or_else(|_| Vec::new(), |state| state.requests.clone())
    }

    /// Sets or clears the response override.
    pub fn set_override(&self, override_response: Option<StubOverride>) {
        if let Ok(mut state) = self.state.lock() {
            state.override_response = override_response;
        }
    }

    /// Records the request and runs `handle` unless an override is active.
    fn dispatch(
        &self,
        method: &str,
        path: String,
        handle: impl FnOnce(&mut BTreeMap<SkuId, Sku>) -> Response,
    ) -> Response {
        let Ok(mut state) = self.state.lock() else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };
        state.requests.push(StubRequest {
            method: method.to_string(),
            path,
        });
        if let Some(canned) = state.override_response.clone() {
            return canned_response(canned);
        }
        handle(&mut state.records)
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// `GET /dev/skus`
async fn list_skus(State(catalog): State<StubCatalog>) -> Response {
    catalog.dispatch("GET", format!("{STAGE_PREFIX}/skus"), |records| {
        Json(records.values().cloned().collect::<Vec<_>>()).into_response()
    })
}

/// `GET /dev/skus/{id}`
async fn get_sku(State(catalog): State<StubCatalog>, Path(id): Path<String>) -> Response {
    catalog.dispatch("GET", format!("{STAGE_PREFIX}/skus/{id}"), |records| {
        let item = records.get(&SkuId::new(id.as_str())).cloned();
        Json(item.map_or_else(SkuItem::missing, SkuItem::found)).into_response()
    })
}

/// `POST /dev/skus`
async fn create_sku(State(catalog): State<StubCatalog>, body: Bytes) -> Response {
    catalog.dispatch("POST", format!("{STAGE_PREFIX}/skus"), |records| {
        match serde_json::from_slice::<Sku>(&body) {
            Ok(sku) => {
                records.insert(sku.sku.clone(), sku);
                Json(json!({})).into_response()
            }
            Err(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": format!("invalid sku: {err}")})),
            )
                .into_response(),
        }
    })
}

/// `DELETE /dev/skus/{id}`
async fn delete_sku(State(catalog): State<StubCatalog>, Path(id): Path<String>) -> Response {
    catalog.dispatch("DELETE", format!("{STAGE_PREFIX}/skus/{id}"), |records| {
        records.remove(&SkuId::new(id.as_str()));
        Json(json!({})).into_response()
    })
}

/// Renders an override as a response.
fn canned_response(canned: StubOverride) -> Response {
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}

// ============================================================================
// SECTION: Background Server
// ============================================================================

/// Handle for a stub running on a background thread.
pub struct SkuStubHandle {
    /// Base URL including the stage prefix and trailing slash.
    base_url: String,
    /// Catalog shared with the server.
    catalog: StubCatalog,
    /// Shutdown trigger.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
}

impl SkuStubHandle {
    /// Returns the stub base URL (`http://127.0.0.1:<port>/dev/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the catalog served by this stub.
    #[must_use]
    pub const fn catalog(&self) -> &StubCatalog {
        &self.catalog
    }
}

impl Drop for SkuStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns a stub seeded with `seed` on an ephemeral localhost port.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound.
pub fn spawn_sku_stub(seed: Vec<Sku>) -> Result<SkuStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("sku stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("sku stub listener nonblocking failed: {err}"))?;
    let addr: SocketAddr =
        listener.local_addr().map_err(|err| format!("sku stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}{STAGE_PREFIX}/");

    let catalog = StubCatalog::new(seed);
    let server_catalog = catalog.clone();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let _ = server_catalog
                .serve(listener, async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
    });
    Ok(SkuStubHandle {
        base_url,
        catalog,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}
