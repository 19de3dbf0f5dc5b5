// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the registry service and its host.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// The endpoint every default bootstrap record points at.
pub const DEFAULT_SEED_ENDPOINT: &str = "http://localhost:9000/api/mno";

/// The service id the registry is dispatched under by default.
pub const DEFAULT_SERVICE_ID: &str = "mno_registry";

/// Top-level configuration file layout.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct NodeConfig {
    /// Settings for the MNO registry service.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Settings for structured logging.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(s)?;
        config.registry.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Configuration for the MNO registry service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// The id the service is registered and dispatched under.
    #[serde(default = "default_service_id")]
    pub service_id: String,
    /// The bootstrap records created by `seed@v1`, in creation order.
    #[serde(default = "default_seed_records")]
    pub seed: Vec<SeedRecord>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
            seed: default_seed_records(),
        }
    }
}

impl RegistryConfig {
    /// Checks that the service id is set and that seed ids are non-empty and distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_id.is_empty() {
            return Err(ConfigError::Invalid("registry.service_id must not be empty".into()));
        }
        let mut seen = BTreeSet::new();
        for record in &self.seed {
            if record.mno_id.is_empty() {
                return Err(ConfigError::Invalid("seed record with empty mnoId".into()));
            }
            if !seen.insert(record.mno_id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate seed mnoId '{}'",
                    record.mno_id
                )));
            }
        }
        Ok(())
    }
}

/// One bootstrap record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedRecord {
    /// The record id.
    #[serde(rename = "mnoId")]
    pub mno_id: String,
    /// The record name.
    #[serde(rename = "mnoName")]
    pub mno_name: String,
    /// The record endpoint.
    pub endpoint: String,
}

impl SeedRecord {
    fn new(id: &str, endpoint: &str) -> Self {
        Self {
            mno_id: id.to_string(),
            mno_name: id.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

/// Configuration for structured logging.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// The `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_service_id() -> String {
    DEFAULT_SERVICE_ID.to_string()
}

fn default_seed_records() -> Vec<SeedRecord> {
    ["mno1", "mno2", "mno3", "mno4", "mno5", "mno6"]
        .iter()
        .map(|id| SeedRecord::new(id, DEFAULT_SEED_ENDPOINT))
        .collect()
}

fn default_log_filter() -> String {
    "info".to_string()
}
