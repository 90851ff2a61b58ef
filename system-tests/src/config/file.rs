// system-tests/src/config/file.rs
// ============================================================================
// Module: System Test Config File
// Description: Optional TOML overlay for system-test configuration.
// Purpose: Let operators keep target settings in a checked-in file.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! The file format mirrors the environment variables one-to-one. Unknown keys
//! are rejected so typos fail closed instead of silently falling back to
//! defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use super::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Raw contents of a system-test TOML file.
///
/// ```toml
/// base_url = "https://example.execute-api.us-west-2.amazonaws.com/dev/"
/// list_threshold = 7
/// fixture_id = "item-123-4-567"
/// timeout_sec = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemTestFile {
    /// Live service base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// The list endpoint must return more records than this.
    #[serde(default)]
    pub list_threshold: Option<usize>,
    /// Pre-seeded record id used by the lookup test.
    #[serde(default)]
    pub fixture_id: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_sec: Option<u64>,
    /// Artifact root override.
    #[serde(default)]
    pub run_root: Option<PathBuf>,
    /// JSON-line audit log path.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

impl SystemTestFile {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, not
    /// UTF-8, or not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses config file contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
