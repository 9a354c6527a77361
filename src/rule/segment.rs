//! Alteration segments and their conversion into a configuration delta.
//!
//! # Responsibilities
//! - Represent one parsed `ALTER TRAFFIC RULE` unit
//! - Normalize segments into the TrafficRuleConfig shape the merger consumes
//!
//! # Design Decisions
//! - Dictionary keys are derived as `lowercase("{strategy}_{type}")`
//! - A repeated segment name replaces the earlier segment's strategy

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::rule::config::{AlgorithmConfig, StrategyConfig, TrafficRuleConfig};

/// Algorithm reference as written in a statement: type name plus properties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlgorithmSegment {
    /// Algorithm type name, checked against the algorithm registry.
    pub name: String,

    #[serde(default)]
    pub props: IndexMap<String, String>,
}

impl AlgorithmSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: IndexMap::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    fn to_algorithm_config(&self) -> AlgorithmConfig {
        AlgorithmConfig {
            type_name: self.name.clone(),
            props: self.props.clone(),
        }
    }
}

/// One unit of an alteration request, targeting an existing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeltaSegment {
    /// Name of the strategy to alter.
    pub name: String,

    #[serde(default)]
    pub labels: IndexSet<String>,

    pub algorithm: AlgorithmSegment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<AlgorithmSegment>,
}

impl DeltaSegment {
    pub fn new(name: impl Into<String>, algorithm: AlgorithmSegment) -> Self {
        Self {
            name: name.into(),
            labels: IndexSet::new(),
            algorithm,
            load_balancer: None,
        }
    }

    pub fn with_load_balancer(mut self, load_balancer: AlgorithmSegment) -> Self {
        self.load_balancer = Some(load_balancer);
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
}

/// On-disk form of an alteration request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeltaDocument {
    pub segments: Vec<DeltaSegment>,
}

/// Dictionary key for an algorithm declared inside a segment.
pub fn algorithm_key(strategy_name: &str, algorithm: &AlgorithmSegment) -> String {
    format!("{}_{}", strategy_name, algorithm.name).to_lowercase()
}

/// Normalize segments into a configuration delta.
pub fn to_rule_config(segments: &[DeltaSegment]) -> TrafficRuleConfig {
    let mut strategies: IndexMap<&str, StrategyConfig> = IndexMap::new();
    let mut algorithms = IndexMap::new();
    let mut load_balancers = IndexMap::new();

    for segment in segments {
        let algorithm_name = algorithm_key(&segment.name, &segment.algorithm);
        algorithms.insert(algorithm_name.clone(), segment.algorithm.to_algorithm_config());

        let load_balancer_name = segment.load_balancer.as_ref().map(|lb| {
            let key = algorithm_key(&segment.name, lb);
            load_balancers.insert(key.clone(), lb.to_algorithm_config());
            key
        });

        strategies.insert(
            segment.name.as_str(),
            StrategyConfig {
                name: segment.name.clone(),
                algorithm_name,
                load_balancer_name,
                labels: segment.labels.clone(),
            },
        );
    }

    TrafficRuleConfig {
        strategies: strategies.into_values().collect(),
        algorithms,
        load_balancers,
    }
}
