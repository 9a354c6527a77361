//! Shared fixtures for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use traffic_rule::algorithm::AlgorithmTypeRegistry;
use traffic_rule::persist::{ConfigPersister, PersistError};
use traffic_rule::rule::{AlgorithmConfig, AlgorithmSegment, DeltaSegment, StrategyConfig};
use traffic_rule::{AlterTrafficRuleHandler, RuleRegistry, TrafficRuleConfig};

/// Persister that records every write and can be told to fail.
#[derive(Default)]
pub struct RecordingPersister {
    writes: Mutex<Vec<(TrafficRuleConfig, bool)>>,
    fail: AtomicBool,
}

impl RecordingPersister {
    pub fn failing() -> Self {
        let persister = Self::default();
        persister.fail.store(true, Ordering::SeqCst);
        persister
    }

    pub fn writes(&self) -> Vec<(TrafficRuleConfig, bool)> {
        self.writes.lock().unwrap().clone()
    }
}

impl ConfigPersister for RecordingPersister {
    fn persist(&self, configuration: &TrafficRuleConfig, overwrite: bool) -> Result<(), PersistError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "metadata store unavailable",
            )));
        }
        self.writes.lock().unwrap().push((configuration.clone(), overwrite));
        Ok(())
    }
}

/// `[{s1, a1, lb1}, {s2, a2}]` with `{a1, a2}` and `{lb1}`.
pub fn current_config() -> TrafficRuleConfig {
    let mut config = TrafficRuleConfig {
        strategies: vec![
            StrategyConfig::new("s1", "a1")
                .with_load_balancer("lb1")
                .with_labels(["OLTP"]),
            StrategyConfig::new("s2", "a2").with_labels(["OLAP"]),
        ],
        ..Default::default()
    };
    config.algorithms.insert("a1".into(), AlgorithmConfig::new("SQL_MATCH"));
    config.algorithms.insert("a2".into(), AlgorithmConfig::new("SQL_HINT"));
    config.load_balancers.insert("lb1".into(), AlgorithmConfig::new("RANDOM"));
    config
}

pub fn segment(name: &str, algorithm: &str, load_balancer: Option<&str>) -> DeltaSegment {
    let segment = DeltaSegment::new(name, AlgorithmSegment::new(algorithm));
    match load_balancer {
        Some(lb) => segment.with_load_balancer(AlgorithmSegment::new(lb)),
        None => segment,
    }
}

/// Handler over `current_config()` with a recording persister.
pub fn handler_with(persister: Arc<RecordingPersister>) -> AlterTrafficRuleHandler {
    AlterTrafficRuleHandler::new(
        Arc::new(RuleRegistry::new(current_config())),
        Arc::new(AlgorithmTypeRegistry::with_builtins()),
    )
    .with_persister(persister)
}
