//! Active traffic rule instance.
//!
//! # Responsibilities
//! - Resolve each strategy's algorithm and load balancer definitions
//! - Index strategies by label for lookup by routing code
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Holds the same Arc<TrafficRuleConfig> it was built from, so the
//!   instance and its raw configuration can never disagree
//! - Dangling references resolve to None instead of failing construction

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::rule::config::{AlgorithmConfig, TrafficRuleConfig};

/// A strategy with its referenced definitions resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRule {
    pub name: String,
    pub labels: IndexSet<String>,
    pub algorithm: Option<AlgorithmConfig>,
    pub load_balancer: Option<AlgorithmConfig>,
}

/// The traffic rule built from one configuration snapshot.
#[derive(Debug)]
pub struct TrafficRule {
    configuration: Arc<TrafficRuleConfig>,
    strategy_rules: Vec<StrategyRule>,
    /// Label -> indexes into `strategy_rules`, in configuration order.
    by_label: HashMap<String, Vec<usize>>,
}

impl TrafficRule {
    /// Build a rule from a configuration.
    pub fn new(configuration: Arc<TrafficRuleConfig>) -> Self {
        let mut strategy_rules = Vec::with_capacity(configuration.strategies.len());
        let mut by_label: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, strategy) in configuration.strategies.iter().enumerate() {
            let algorithm = configuration.algorithms.get(&strategy.algorithm_name).cloned();
            if algorithm.is_none() {
                tracing::warn!(
                    strategy = %strategy.name,
                    algorithm = %strategy.algorithm_name,
                    "Strategy references unknown traffic algorithm"
                );
            }

            let load_balancer = strategy.load_balancer().and_then(|name| {
                let resolved = configuration.load_balancers.get(name).cloned();
                if resolved.is_none() {
                    tracing::warn!(
                        strategy = %strategy.name,
                        load_balancer = %name,
                        "Strategy references unknown load balancer"
                    );
                }
                resolved
            });

            for label in &strategy.labels {
                by_label.entry(label.clone()).or_default().push(index);
            }

            strategy_rules.push(StrategyRule {
                name: strategy.name.clone(),
                labels: strategy.labels.clone(),
                algorithm,
                load_balancer,
            });
        }

        Self {
            configuration,
            strategy_rules,
            by_label,
        }
    }

    /// The configuration this rule was built from.
    pub fn configuration(&self) -> &Arc<TrafficRuleConfig> {
        &self.configuration
    }

    pub fn strategy_rules(&self) -> &[StrategyRule] {
        &self.strategy_rules
    }

    pub fn strategy(&self, name: &str) -> Option<&StrategyRule> {
        self.strategy_rules.iter().find(|s| s.name == name)
    }

    /// Strategies carrying `label`, in configuration order.
    pub fn strategies_with_label(&self, label: &str) -> Vec<&StrategyRule> {
        self.by_label
            .get(label)
            .map(|indexes| indexes.iter().map(|&i| &self.strategy_rules[i]).collect())
            .unwrap_or_default()
    }
}
