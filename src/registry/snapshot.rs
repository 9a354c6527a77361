//! Versioned rule snapshots behind an atomic pointer.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::rule::{TrafficRule, TrafficRuleConfig};

/// One published (rule instance, raw configuration) pair.
#[derive(Debug)]
pub struct RuleSnapshot {
    /// Increases by one on every publish.
    pub version: u64,
    rule: Arc<TrafficRule>,
}

impl RuleSnapshot {
    fn new(version: u64, configuration: Arc<TrafficRuleConfig>) -> Self {
        Self {
            version,
            rule: Arc::new(TrafficRule::new(configuration)),
        }
    }

    /// The active rule instance.
    pub fn rule(&self) -> &Arc<TrafficRule> {
        &self.rule
    }

    /// The raw configuration backing the rule.
    pub fn configuration(&self) -> &Arc<TrafficRuleConfig> {
        self.rule.configuration()
    }
}

/// Process-wide holder of the active traffic rule.
#[derive(Debug)]
pub struct RuleRegistry {
    current: ArcSwap<RuleSnapshot>,
}

impl RuleRegistry {
    /// Create the registry with its bootstrap configuration.
    pub fn new(configuration: TrafficRuleConfig) -> Self {
        let snapshot = RuleSnapshot::new(1, Arc::new(configuration));
        metrics::record_snapshot(snapshot.version, snapshot.configuration().strategies.len());
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Load the current snapshot.
    pub fn load(&self) -> Arc<RuleSnapshot> {
        self.current.load_full()
    }

    /// The current rule instance.
    pub fn rule(&self) -> Arc<TrafficRule> {
        self.current.load().rule.clone()
    }

    /// The current raw configuration.
    pub fn configuration(&self) -> Arc<TrafficRuleConfig> {
        self.current.load().configuration().clone()
    }

    /// Replace the active rule and its configuration in one atomic step.
    ///
    /// The new snapshot is fully built before the swap. Concurrent publishers
    /// must be serialized by the caller.
    pub fn publish(&self, configuration: TrafficRuleConfig) -> Arc<RuleSnapshot> {
        let version = self.current.load().version + 1;
        let next = Arc::new(RuleSnapshot::new(version, Arc::new(configuration)));
        let previous = self.current.swap(next.clone());

        tracing::info!(
            previous_version = previous.version,
            version = next.version,
            strategies = next.configuration().strategies.len(),
            "Traffic rule published"
        );
        metrics::record_snapshot(next.version, next.configuration().strategies.len());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::StrategyConfig;

    fn config_with(names: &[&str]) -> TrafficRuleConfig {
        TrafficRuleConfig {
            strategies: names.iter().map(|n| StrategyConfig::new(*n, "a1")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bootstrap_snapshot() {
        let registry = RuleRegistry::new(config_with(&["s1"]));
        let snapshot = registry.load();
        assert_eq!(snapshot.version, 1);
        assert!(snapshot.rule().strategy("s1").is_some());
        assert!(Arc::ptr_eq(snapshot.configuration(), snapshot.rule().configuration()));
    }

    #[test]
    fn test_publish_replaces_both_views() {
        let registry = RuleRegistry::new(config_with(&["s1"]));
        let before = registry.load();

        let published = registry.publish(config_with(&["s2"]));
        assert_eq!(published.version, 2);

        let after = registry.load();
        assert!(Arc::ptr_eq(&after, &published));
        assert!(after.rule().strategy("s2").is_some());
        assert!(after.rule().strategy("s1").is_none());
        assert_eq!(registry.configuration().strategies[0].name, "s2");

        // Old readers keep their snapshot.
        assert_eq!(before.version, 1);
        assert!(before.rule().strategy("s1").is_some());
    }
}
