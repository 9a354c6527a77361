//! Concurrent registry of known algorithm types.

use dashmap::DashSet;

use crate::algorithm::AlgorithmRegistry;
use crate::config::schema::AlgorithmTypesConfig;

/// Traffic algorithm types available without plugins.
pub const BUILTIN_ALGORITHMS: &[&str] = &[
    "SQL_MATCH",
    "SQL_REGEX",
    "SQL_HINT",
    "FIRST_SQL",
    "TRANSACTION",
    "JDBC",
    "PROXY",
];

/// Load balancer types available without plugins.
pub const BUILTIN_LOAD_BALANCERS: &[&str] = &["RANDOM", "ROUND_ROBIN"];

/// Set of registered type names. Lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct AlgorithmTypeRegistry {
    algorithms: DashSet<String>,
    load_balancers: DashSet<String>,
}

impl AlgorithmTypeRegistry {
    /// Create an empty registry (no built-ins).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in types.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        for name in BUILTIN_ALGORITHMS {
            registry.register_algorithm(name);
        }
        for name in BUILTIN_LOAD_BALANCERS {
            registry.register_load_balancer(name);
        }
        registry
    }

    /// Built-ins plus the plugin types declared in config.
    pub fn from_config(config: &AlgorithmTypesConfig) -> Self {
        let registry = Self::with_builtins();
        for name in &config.algorithms {
            registry.register_algorithm(name);
        }
        for name in &config.load_balancers {
            registry.register_load_balancer(name);
        }
        tracing::debug!(
            algorithms = registry.algorithms.len(),
            load_balancers = registry.load_balancers.len(),
            "Algorithm types registered"
        );
        registry
    }

    pub fn register_algorithm(&self, type_name: &str) {
        self.algorithms.insert(normalize(type_name));
    }

    pub fn register_load_balancer(&self, type_name: &str) {
        self.load_balancers.insert(normalize(type_name));
    }
}

impl AlgorithmRegistry for AlgorithmTypeRegistry {
    fn contains_algorithm(&self, type_name: &str) -> bool {
        self.algorithms.contains(&normalize(type_name))
    }

    fn contains_load_balancer(&self, type_name: &str) -> bool {
        self.load_balancers.contains(&normalize(type_name))
    }
}

fn normalize(type_name: &str) -> String {
    type_name.trim().to_uppercase()
}
