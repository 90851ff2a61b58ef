// system-tests/tests/helpers/target.rs
// ============================================================================
// Module: Contract Target
// Description: Resolves the service a contract test runs against.
// Purpose: Use the configured live service, or an in-process stub when unset.
// Dependencies: system-tests, sku-api-client
// ============================================================================

use std::sync::Arc;

use sku_api_client::FileAuditSink;
use sku_api_client::SkuApiClient;
use system_tests::config::SystemTestConfig;
use system_tests::fixtures::seed_catalog;
use system_tests::stub::SkuStubHandle;
use system_tests::stub::spawn_sku_stub;

/// Service under test plus the client bound to it.
pub struct ContractTarget {
    config: SystemTestConfig,
    client: SkuApiClient,
    stub: Option<SkuStubHandle>,
}

impl ContractTarget {
    /// Loads configuration and builds a client for the selected target.
    pub fn resolve() -> Result<Self, String> {
        let config = SystemTestConfig::load().map_err(|err| err.to_string())?;
        let (base_url, stub) = match &config.base_url {
            Some(base_url) => (base_url.clone(), None),
            None => {
                let stub = spawn_sku_stub(seed_catalog(&config.fixture_id, config.list_threshold))?;
                (stub.base_url().to_string(), Some(stub))
            }
        };
        let mut client = SkuApiClient::new(&base_url, config.timeout)
            .map_err(|err| format!("client for {base_url}: {err}"))?;
        if let Some(path) = &config.audit_log {
            let sink = FileAuditSink::new(path)
                .map_err(|err| format!("open audit log {}: {err}", path.display()))?;
            client = client.with_audit_sink(Arc::new(sink));
        }
        Ok(Self {
            config,
            client,
            stub,
        })
    }

    /// Returns the resolved configuration.
    pub const fn config(&self) -> &SystemTestConfig {
        &self.config
    }

    /// Returns the client bound to the target.
    pub const fn client(&self) -> &SkuApiClient {
        &self.client
    }

    /// Returns the stub when the target is local.
    pub const fn stub(&self) -> Option<&SkuStubHandle> {
        self.stub.as_ref()
    }

    /// Label recorded in test summaries.
    pub fn label(&self) -> String {
        match &self.stub {
            Some(stub) => format!("stub {}", stub.base_url()),
            None => format!("live {}", self.client.base_url()),
        }
    }
}
