//! Merge a configuration delta into the current configuration.
//!
//! # Responsibilities
//! - Replace strategies by name (remove, then append)
//! - Overlay algorithm definitions
//! - Overlay load balancers, then drop the ones no strategy references
//!
//! # Design Decisions
//! - Pure function: always returns a fresh TrafficRuleConfig
//! - Load balancer collection is driven by the merged strategy set, so an
//!   entry survives as long as any strategy still references it

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::rule::{AlgorithmConfig, StrategyConfig, TrafficRuleConfig};

/// Compute the configuration resulting from applying `delta` to `current`.
pub fn merge(current: &TrafficRuleConfig, delta: &TrafficRuleConfig) -> TrafficRuleConfig {
    let strategies = merge_strategies(&current.strategies, &delta.strategies);
    let algorithms = overlay(&current.algorithms, &delta.algorithms);

    let mut load_balancers = overlay(&current.load_balancers, &delta.load_balancers);
    let in_use: HashSet<&str> = strategies
        .iter()
        .filter_map(StrategyConfig::load_balancer)
        .collect();
    load_balancers.retain(|name, _| in_use.contains(name.as_str()));

    TrafficRuleConfig {
        strategies,
        algorithms,
        load_balancers,
    }
}

/// Delta dictionary keys already referenced by a strategy the delta leaves
/// alone. Overlaying such a key rewrites that strategy's definition too.
pub fn shadowed_keys<'a>(current: &TrafficRuleConfig, delta: &'a TrafficRuleConfig) -> Vec<&'a str> {
    let altered: HashSet<&str> = delta.strategies.iter().map(|s| s.name.as_str()).collect();
    let mut untouched = HashSet::new();
    for strategy in current.strategies.iter().filter(|s| !altered.contains(s.name.as_str())) {
        untouched.insert(strategy.algorithm_name.as_str());
        untouched.extend(strategy.load_balancer());
    }
    delta
        .algorithms
        .keys()
        .chain(delta.load_balancers.keys())
        .map(String::as_str)
        .filter(|key| untouched.contains(key))
        .collect()
}

fn merge_strategies(current: &[StrategyConfig], delta: &[StrategyConfig]) -> Vec<StrategyConfig> {
    let altered: HashSet<&str> = delta.iter().map(|s| s.name.as_str()).collect();
    current
        .iter()
        .filter(|s| !altered.contains(s.name.as_str()))
        .chain(delta.iter())
        .cloned()
        .collect()
}

fn overlay(
    current: &IndexMap<String, AlgorithmConfig>,
    delta: &IndexMap<String, AlgorithmConfig>,
) -> IndexMap<String, AlgorithmConfig> {
    let mut result = current.clone();
    for (name, algorithm) in delta {
        result.insert(name.clone(), algorithm.clone());
    }
    result
}
