// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for SKU API system-tests.
// Purpose: Provide target resolution and artifact utilities.
// Dependencies: system-tests, sku-api-client
// ============================================================================

//! ## Overview
//! Shared helpers for SKU API system-tests.
//! Invariants:
//! - Each test case resolves its own target and client; nothing is shared.
//! - Ids written by a test are generated fresh for that test.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod target;
