// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for SKU API system tests.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! System-test configuration starts from built-in defaults, is overlaid by an
//! optional TOML file, and finally by environment variables. The result is a
//! small typed structure shared by every suite.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod file;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading the config file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::DEFAULT_FIXTURE_ID;
pub use env::DEFAULT_LIST_THRESHOLD;
pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::read_env_strict;
pub use file::SystemTestFile;
