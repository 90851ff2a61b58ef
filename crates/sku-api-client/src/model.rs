// crates/sku-api-client/src/model.rs
// ============================================================================
// Module: SKU Records
// Description: Wire types for SKU records and single-record lookups.
// Purpose: Decode service payloads into strongly typed records.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The service stores flat records of `sku`, `description` and `price`, all
//! strings. Lookups by id wrap the record in an `Item` envelope that is
//! absent (or `null`) when the id is unknown.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// SKU identifier; serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(String);

impl SkuId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkuId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SkuId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// A stock keeping unit as exchanged with the service.
///
/// # Invariants
/// - All three fields are required; `null` or missing fields fail decoding.
/// - `price` stays string-encoded so decimal text round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    /// Record identifier.
    pub sku: SkuId,
    /// Human-readable description.
    pub description: String,
    /// Decimal price as text.
    pub price: String,
}

impl Sku {
    /// Builds a record from its three fields.
    #[must_use]
    pub fn new(
        sku: impl Into<SkuId>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            description: description.into(),
            price: price.into(),
        }
    }
}

/// Envelope returned by `GET skus/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkuItem {
    /// The record, or `None` when the id is unknown.
    #[serde(rename = "Item", default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Sku>,
}

impl SkuItem {
    /// Wraps a found record.
    #[must_use]
    pub const fn found(sku: Sku) -> Self {
        Self {
            item: Some(sku),
        }
    }

    /// Returns the empty envelope used for unknown ids.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            item: None,
        }
    }

    /// Returns true when the lookup found a record.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.item.is_some()
    }

    /// Consumes the envelope and returns the record, if any.
    #[must_use]
    pub fn into_sku(self) -> Option<Sku> {
        self.item
    }
}
