// system-tests/src/lib.rs
// ============================================================================
// Module: SKU API System Tests Library
// Description: Shared configuration, fixtures, and stub service for contract tests.
// Purpose: Provide common utilities for the SKU API system-test binaries.
// Dependencies: axum, rand, sku-api-client, toml, url
// ============================================================================

//! ## Overview
//! This crate hosts the configuration, fixtures and in-process SKU stub
//! service used by the contract suites in `system-tests/tests`. When no base
//! URL is configured the suites run against the stub, so the contract can be
//! checked without network access.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod fixtures;
pub mod stub;
