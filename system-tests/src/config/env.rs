// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: sku-api-client, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use sku_api_client::SkuId;
use url::Url;

use super::ConfigError;
use super::file::SystemTestFile;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Default number of records the list endpoint must exceed.
pub const DEFAULT_LIST_THRESHOLD: usize = 7;
/// Default id of the record expected to be pre-seeded in the service.
pub const DEFAULT_FIXTURE_ID: &str = "item-123-4-567";

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional TOML config file path.
    ConfigPath,
    /// Optional live service base URL; unset means the in-process stub.
    BaseUrl,
    /// Optional list size threshold (non-negative integer).
    ListThreshold,
    /// Optional pre-seeded fixture id.
    FixtureId,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional run root override.
    RunRoot,
    /// Optional JSON-line audit log path.
    AuditLog,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "SKU_API_SYSTEM_TEST_CONFIG",
            Self::BaseUrl => "SKU_API_SYSTEM_TEST_BASE_URL",
            Self::ListThreshold => "SKU_API_SYSTEM_TEST_LIST_THRESHOLD",
            Self::FixtureId => "SKU_API_SYSTEM_TEST_FIXTURE_ID",
            Self::TimeoutSeconds => "SKU_API_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "SKU_API_SYSTEM_TEST_RUN_ROOT",
            Self::AuditLog => "SKU_API_SYSTEM_TEST_AUDIT_LOG",
        }
    }

    /// Returns every key in resolution order.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::ConfigPath,
            Self::BaseUrl,
            Self::ListThreshold,
            Self::FixtureId,
            Self::TimeoutSeconds,
            Self::RunRoot,
            Self::AuditLog,
        ]
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Live service base URL; `None` runs the suites against the stub.
    pub base_url: Option<String>,
    /// The list endpoint must return strictly more records than this.
    pub list_threshold: usize,
    /// Pre-seeded record id used by the lookup test.
    pub fixture_id: SkuId,
    /// Optional per-request timeout; `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional JSON-line audit log path.
    pub audit_log: Option<PathBuf>,
}

impl Default for SystemTestConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            list_threshold: DEFAULT_LIST_THRESHOLD,
            fixture_id: SkuId::new(DEFAULT_FIXTURE_ID),
            timeout: None,
            run_root: None,
            audit_log: None,
        }
    }
}

impl SystemTestConfig {
    /// Loads configuration from defaults, the optional file, then environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the config file cannot be read or parsed, or when
    /// an environment value is not valid UTF-8, is empty, or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = read_env_nonempty(SystemTestEnv::ConfigPath.as_str())? {
            config.apply_file(SystemTestFile::load(Path::new(&path))?)?;
        }
        config.apply_env()?;
        Ok(config)
    }

    /// Overlays values from a parsed config file.
    ///
    /// # Errors
    ///
    /// Returns an error when a file value fails validation.
    pub fn apply_file(&mut self, file: SystemTestFile) -> Result<(), ConfigError> {
        if let Some(raw) = file.base_url {
            self.base_url = Some(parse_base_url("base_url", &raw)?);
        }
        if let Some(threshold) = file.list_threshold {
            self.list_threshold = threshold;
        }
        if let Some(raw) = file.fixture_id {
            self.fixture_id = parse_fixture_id("fixture_id", &raw)?;
        }
        if let Some(secs) = file.timeout_sec {
            if secs == 0 {
                return Err(ConfigError::Invalid("timeout_sec must be greater than zero".to_string()));
            }
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(run_root) = file.run_root {
            self.run_root = Some(run_root);
        }
        if let Some(audit_log) = file.audit_log {
            self.audit_log = Some(audit_log);
        }
        Ok(())
    }

    /// Overlays values from environment variables.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        let base_url_key = SystemTestEnv::BaseUrl.as_str();
        if let Some(raw) = read_env_nonempty(base_url_key)? {
            self.base_url = Some(parse_base_url(base_url_key, &raw)?);
        }
        let threshold_key = SystemTestEnv::ListThreshold.as_str();
        if let Some(raw) = read_env_nonempty(threshold_key)? {
            self.list_threshold = parse_threshold(threshold_key, &raw)?;
        }
        let fixture_key = SystemTestEnv::FixtureId.as_str();
        if let Some(raw) = read_env_nonempty(fixture_key)? {
            self.fixture_id = parse_fixture_id(fixture_key, &raw)?;
        }
        let timeout_key = SystemTestEnv::TimeoutSeconds.as_str();
        if let Some(raw) = read_env_nonempty(timeout_key)? {
            self.timeout = Some(parse_timeout_seconds(timeout_key, &raw)?);
        }
        if let Some(raw) = read_env_nonempty(SystemTestEnv::RunRoot.as_str())? {
            self.run_root = Some(PathBuf::from(raw));
        }
        if let Some(raw) = read_env_nonempty(SystemTestEnv::AuditLog.as_str())? {
            self.audit_log = Some(PathBuf::from(raw));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Validates an http(s) base URL and returns it trimmed.
fn parse_base_url(name: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|err| ConfigError::Invalid(format!("{name} is not a valid url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!("{name} must include http:// or https://")));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::Invalid(format!("{name} must include a host")));
    }
    Ok(trimmed.to_string())
}

/// Parses a non-negative list threshold.
fn parse_threshold(name: &str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a non-negative integer")))
}

/// Validates a fixture id.
fn parse_fixture_id(name: &str, raw: &str) -> Result<SkuId, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{name} must not be empty")));
    }
    Ok(SkuId::new(trimmed))
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "{name} must be a positive integer number of seconds"
        )));
    }
    let secs: u64 = trimmed.parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
