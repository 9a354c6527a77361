//! Traffic rule configuration schema.
//!
//! These types are shared by the bootstrap config file, the metadata store
//! and the alteration pipeline. All of them derive Serde traits.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A typed algorithm definition with its properties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlgorithmConfig {
    /// Registered algorithm type (e.g., "SQL_MATCH", "RANDOM").
    #[serde(rename = "type")]
    pub type_name: String,

    /// Algorithm properties.
    #[serde(default)]
    pub props: IndexMap<String, String>,
}

impl AlgorithmConfig {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            props: IndexMap::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// A named traffic strategy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Unique strategy identifier.
    pub name: String,

    /// Key into `TrafficRuleConfig::algorithms`.
    pub algorithm_name: String,

    /// Key into `TrafficRuleConfig::load_balancers`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_name: Option<String>,

    /// Tags used to match compute nodes.
    #[serde(default)]
    pub labels: IndexSet<String>,
}

impl StrategyConfig {
    pub fn new(name: impl Into<String>, algorithm_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            algorithm_name: algorithm_name.into(),
            load_balancer_name: None,
            labels: IndexSet::new(),
        }
    }

    pub fn with_load_balancer(mut self, name: impl Into<String>) -> Self {
        self.load_balancer_name = Some(name.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// The referenced load balancer. An empty name counts as no reference.
    pub fn load_balancer(&self) -> Option<&str> {
        self.load_balancer_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

/// Complete traffic rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrafficRuleConfig {
    /// Strategies, unique by name, in declaration order.
    pub strategies: Vec<StrategyConfig>,

    /// Traffic algorithms by name.
    pub algorithms: IndexMap<String, AlgorithmConfig>,

    /// Load balancers by name.
    pub load_balancers: IndexMap<String, AlgorithmConfig>,
}

impl TrafficRuleConfig {
    /// Look up a strategy by name.
    pub fn strategy(&self, name: &str) -> Option<&StrategyConfig> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// Names of all strategies.
    pub fn strategy_names(&self) -> IndexSet<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }

    /// Load balancer names referenced by at least one strategy.
    pub fn referenced_load_balancers(&self) -> IndexSet<&str> {
        self.strategies
            .iter()
            .filter_map(StrategyConfig::load_balancer)
            .collect()
    }
}
