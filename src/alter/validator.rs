//! Referential checks on an alteration request.
//!
//! # Responsibilities
//! - Every segment targets an existing strategy
//! - Every algorithm / load balancer type is registered
//!
//! # Design Decisions
//! - Collects all offending names, not just the first
//! - Both checks always run; strategy errors take precedence over
//!   algorithm errors and the two are never combined
//! - Read-only against the current configuration and the registry

use indexmap::IndexSet;

use crate::algorithm::AlgorithmRegistry;
use crate::alter::error::{AlterError, AlterResult};
use crate::rule::{DeltaSegment, TrafficRuleConfig};

/// Validate `segments` against `current` and the algorithm registry.
pub fn validate(
    current: &TrafficRuleConfig,
    segments: &[DeltaSegment],
    registry: &dyn AlgorithmRegistry,
) -> AlterResult<()> {
    let missing = missing_strategy_names(current, segments);
    let invalid = invalid_algorithm_names(segments, registry);

    if !missing.is_empty() {
        return Err(AlterError::MissingStrategy { names: missing });
    }
    if !invalid.is_empty() {
        return Err(AlterError::InvalidAlgorithmConfiguration { names: invalid });
    }
    Ok(())
}

/// Segment names with no matching strategy, deduplicated in request order.
pub fn missing_strategy_names(current: &TrafficRuleConfig, segments: &[DeltaSegment]) -> Vec<String> {
    let existing = current.strategy_names();
    segments
        .iter()
        .map(|segment| segment.name.as_str())
        .filter(|name| !existing.contains(name))
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Unregistered algorithm and load balancer types, deduplicated in request order.
pub fn invalid_algorithm_names(segments: &[DeltaSegment], registry: &dyn AlgorithmRegistry) -> Vec<String> {
    let mut invalid = IndexSet::new();
    for segment in segments {
        if !registry.contains_algorithm(&segment.algorithm.name) {
            invalid.insert(segment.algorithm.name.as_str());
        }
        if let Some(load_balancer) = &segment.load_balancer {
            if !registry.contains_load_balancer(&load_balancer.name) {
                invalid.insert(load_balancer.name.as_str());
            }
        }
    }
    invalid.into_iter().map(String::from).collect()
}
