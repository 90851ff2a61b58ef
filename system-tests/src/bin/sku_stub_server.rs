// system-tests/src/bin/sku_stub_server.rs
// ============================================================================
// Module: SKU Stub Server
// Description: Standalone runner for the in-memory SKU stub service.
// Purpose: Serve the stub locally so the live suites can target it by URL.
// Dependencies: system-tests, tokio
// ============================================================================

//! SKU stub server binary for system-tests.

use system_tests::config::SystemTestConfig;
use system_tests::config::read_env_strict;
use system_tests::fixtures::seed_catalog;
use system_tests::stub::STAGE_PREFIX;
use system_tests::stub::StubCatalog;

/// Environment variable holding the bind address.
const BIND_ENV: &str = "SKU_API_STUB_BIND";
/// Bind address used when the variable is unset.
const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let bind = match read_env_strict(BIND_ENV) {
        Ok(value) => value.unwrap_or_else(|| DEFAULT_BIND.to_string()),
        Err(err) => {
            eprintln!("sku-stub-server: {err}");
            std::process::exit(1);
        }
    };
    let config = match SystemTestConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("sku-stub-server: config load failed: {err}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("sku-stub-server: bind {bind} failed: {err}");
            std::process::exit(1);
        }
    };
    let catalog = StubCatalog::new(seed_catalog(&config.fixture_id, config.list_threshold));
    eprintln!("sku-stub-server: serving http://{bind}{STAGE_PREFIX}/");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    if let Err(err) = catalog.serve(listener, shutdown).await {
        eprintln!("sku-stub-server: server failed: {err}");
        std::process::exit(1);
    }
}
