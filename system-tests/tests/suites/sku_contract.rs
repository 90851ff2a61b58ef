// system-tests/tests/suites/sku_contract.rs
// ============================================================================
// Module: SKU Contract Tests
// Description: Contract checks for the SKU list, lookup, and write endpoints.
// Purpose: Validate the HTTP surface behaves per contract end to end.
// Dependencies: system-tests helpers, sku-api-client
// ============================================================================

//! ## Overview
//! Each case resolves its own target and client and runs a flat sequence of
//! request/assert steps. Cases that write use freshly generated ids, so they
//! can run in any order and concurrently with each other.

use serde_json::Value;
use sku_api_client::Sku;
use system_tests::fixtures::lifecycle_sku;
use system_tests::fixtures::unique_sku_id;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::target::ContractTarget;

#[tokio::test(flavor = "multi_thread")]
async fn list_all_skus() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("list_all_skus")?;
    let target = ContractTarget::resolve()?;
    reporter.set_target(&target.label());
    let client = target.client();

    let response = client.list_skus_response().await?;
    assert!(response.is_success(), "GET skus failed (status code: {})", response.status);
    assert!(
        response.has_json_content_type(),
        "GET skus returned content type {:?}",
        response.content_type
    );
    let document: Value = response.json("sku list document")?;
    let items = document.as_array().ok_or("GET skus body is not a JSON array")?;
    let threshold = target.config().list_threshold;
    assert!(
        items.len() > threshold,
        "expected more than {threshold} skus, found {}",
        items.len()
    );
    let first = items.first().ok_or("GET skus returned no records")?;
    let sku: Sku = serde_json::from_value(first.clone())
        .map_err(|err| format!("first sku is incomplete: {err}"))?;

    reporter.pass(
        vec![format!("listed {} skus; first is {}", items.len(), sku.sku)],
        &client.transcript(),
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn get_specific_sku_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("get_specific_sku_by_id")?;
    let target = ContractTarget::resolve()?;
    reporter.set_target(&target.label());
    let client = target.client();
    let id = &target.config().fixture_id;

    let item = client.get_sku(id).await?;
    let Some(sku) = item.into_sku() else {
        return Err(format!("fixture sku {id} was not found").into());
    };
    assert_eq!(&sku.sku, id);

    reporter.pass(
        vec![format!("fixture {id} resolved to {:?}", sku.description)],
        &client.transcript(),
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn post_new_sku_and_then_delete() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("post_new_sku_and_then_delete")?;
    let target = ContractTarget::resolve()?;
    reporter.set_target(&target.label());
    let client = target.client();
    let new_sku = lifecycle_sku();
    let id = &new_sku.sku;

    client
        .create_sku(&new_sku)
        .await
        .map_err(|err| format!("failed to post new sku '{id}': {err}"))?;

    let created = client.get_sku(id).await?;
    let Some(stored) = created.into_sku() else {
        return Err(format!("posted sku '{id}' is not readable").into());
    };
    assert_eq!(&stored.sku, id);
    assert_eq!(stored.description, new_sku.description);
    assert_eq!(stored.price, new_sku.price);

    client
        .delete_sku(id)
        .await
        .map_err(|err| format!("failed to delete sku '{id}': {err}"))?;

    let deleted = client.get_sku(id).await?;
    assert!(deleted.item.is_none(), "sku '{id}' is still readable after delete: {deleted:?}");

    reporter.pass(
        vec![format!("created, read, deleted and re-read {id}")],
        &client.transcript(),
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cannot_get_inexistent_sku() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("cannot_get_inexistent_sku")?;
    let target = ContractTarget::resolve()?;
    reporter.set_target(&target.label());
    let client = target.client();
    let id = unique_sku_id("missing");

    let item = client.get_sku(&id).await?;
    assert!(item.item.is_none(), "you can't get a sku that does not even exist: {item:?}");

    reporter.pass(vec![format!("{id} resolved to no item")], &client.transcript())?;
    Ok(())
}
