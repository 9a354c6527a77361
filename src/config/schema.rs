//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::rule::TrafficRuleConfig;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Plugin algorithm types registered on top of the built-ins.
    pub algorithm_types: AlgorithmTypesConfig,

    /// Durable metadata store.
    pub persistence: PersistenceConfig,

    /// Bootstrap traffic rule, used when the metadata store holds none.
    pub traffic: TrafficRuleConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint (watch mode).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Extra algorithm type names.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AlgorithmTypesConfig {
    pub algorithms: Vec<String>,
    pub load_balancers: Vec<String>,
}

/// Metadata store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Persist every committed alteration.
    pub enabled: bool,

    /// Path of the metadata document.
    pub path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "metadata/traffic_rule.toml".to_string(),
        }
    }
}
