//! `ALTER TRAFFIC RULE` pipeline.
//!
//! validate → convert → merge → publish → persist

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::algorithm::AlgorithmRegistry;
use crate::alter::error::AlterResult;
use crate::alter::{merger, validator};
use crate::observability::metrics;
use crate::persist::ConfigPersister;
use crate::registry::RuleRegistry;
use crate::rule::segment::to_rule_config;
use crate::rule::{DeltaSegment, TrafficRuleConfig};

/// Outcome of the durable write that follows a publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum PersistStatus {
    /// No metadata store is configured.
    Skipped,
    Written,
    /// The in-memory rule is live but the store still holds the old one.
    Failed(String),
}

/// Report of a committed alteration.
#[derive(Debug, Clone, Serialize)]
pub struct AlterOutcome {
    pub alteration_id: Uuid,
    pub version: u64,
    pub strategies: usize,
    pub persisted: PersistStatus,
}

/// Applies alteration requests to the active traffic rule.
pub struct AlterTrafficRuleHandler {
    registry: Arc<RuleRegistry>,
    algorithms: Arc<dyn AlgorithmRegistry>,
    persister: Option<Arc<dyn ConfigPersister>>,
}

impl AlterTrafficRuleHandler {
    pub fn new(registry: Arc<RuleRegistry>, algorithms: Arc<dyn AlgorithmRegistry>) -> Self {
        Self {
            registry,
            algorithms,
            persister: None,
        }
    }

    /// Persist every committed configuration through `persister`.
    pub fn with_persister(mut self, persister: Arc<dyn ConfigPersister>) -> Self {
        self.persister = Some(persister);
        self
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Compute the configuration `segments` would produce, without publishing.
    pub fn preview(&self, segments: &[DeltaSegment]) -> AlterResult<TrafficRuleConfig> {
        let current = self.registry.configuration();
        validator::validate(&current, segments, self.algorithms.as_ref())?;
        let delta = to_rule_config(segments);
        let shadowed = merger::shadowed_keys(&current, &delta);
        if !shadowed.is_empty() {
            tracing::warn!(
                keys = ?shadowed,
                "Alteration overwrites definitions shared with unaltered strategies"
            );
        }
        Ok(merger::merge(&current, &delta))
    }

    /// Validate, merge and publish `segments`, then persist the result.
    ///
    /// Validation errors leave the registry and the store untouched. Once the
    /// publish happens the alteration is committed, whatever the persist does.
    pub fn execute(&self, segments: &[DeltaSegment]) -> AlterResult<AlterOutcome> {
        let alteration_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "alter_traffic_rule",
            alteration_id = %alteration_id,
            segments = segments.len()
        );
        let _enter = span.enter();

        let merged = match self.preview(segments) {
            Ok(merged) => merged,
            Err(e) => {
                tracing::warn!(kind = e.kind(), names = ?e.names(), "Alteration rejected");
                metrics::record_alteration(e.kind());
                return Err(e);
            }
        };

        let snapshot = self.registry.publish(merged);
        let persisted = self.persist(snapshot.configuration());
        metrics::record_alteration("committed");

        Ok(AlterOutcome {
            alteration_id,
            version: snapshot.version,
            strategies: snapshot.configuration().strategies.len(),
            persisted,
        })
    }

    fn persist(&self, configuration: &TrafficRuleConfig) -> PersistStatus {
        let Some(persister) = &self.persister else {
            return PersistStatus::Skipped;
        };
        match persister.persist(configuration, true) {
            Ok(()) => PersistStatus::Written,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to persist traffic rule; in-memory rule stays active until the next successful alteration"
                );
                metrics::record_persist_failure();
                PersistStatus::Failed(e.to_string())
            }
        }
    }
}
