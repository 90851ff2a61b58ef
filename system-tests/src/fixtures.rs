// system-tests/src/fixtures.rs
// ============================================================================
// Module: SKU Fixtures
// Description: Record and identifier fixtures for contract tests.
// Purpose: Keep per-run ids unique so suites never collide on shared state.
// Dependencies: rand, sku-api-client
// ============================================================================

//! ## Overview
//! Tests that write to the service use ids with a random 128-bit suffix, so
//! concurrent cases, repeated runs and the pre-seeded fixture never overlap.

use sku_api_client::Sku;
use sku_api_client::SkuId;

/// Returns `<prefix>-<32 hex digits>`.
#[must_use]
pub fn unique_sku_id(prefix: &str) -> SkuId {
    let suffix: u128 = rand::random();
    SkuId::new(format!("{prefix}-{suffix:032x}"))
}

/// The jelly donut record used by the lifecycle test, under a fresh id.
#[must_use]
pub fn lifecycle_sku() -> Sku {
    Sku::new(unique_sku_id("berliner"), "Jelly donut", "2.99")
}

/// Builds a catalog that satisfies the list and lookup contracts.
///
/// The first record carries `fixture_id`; the catalog holds
/// `list_threshold + 1` records in total.
#[must_use]
pub fn seed_catalog(fixture_id: &SkuId, list_threshold: usize) -> Vec<Sku> {
    let mut records = vec![Sku::new(fixture_id.clone(), "Glazed donut", "1.25")];
    records.extend(
        (1..=list_threshold)
            .map(|index| Sku::new(format!("seed-{index:04}"), format!("Seed pastry {index}"), "0.99")),
    );
    records
}
