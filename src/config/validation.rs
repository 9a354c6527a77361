//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (strategies reference existing algorithms
//!   and load balancers, no orphan load balancers)
//! - Check every declared type is registered
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure functions over the parsed config
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::algorithm::{AlgorithmRegistry, AlgorithmTypeRegistry};
use crate::config::schema::AppConfig;
use crate::rule::TrafficRuleConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("duplicate strategy name '{0}'")]
    DuplicateStrategy(String),

    #[error("strategy '{strategy}' references unknown algorithm '{algorithm}'")]
    UnknownAlgorithm { strategy: String, algorithm: String },

    #[error("strategy '{strategy}' references unknown load balancer '{load_balancer}'")]
    UnknownLoadBalancer { strategy: String, load_balancer: String },

    #[error("load balancer '{0}' is not referenced by any strategy")]
    OrphanLoadBalancer(String),

    #[error("algorithm '{name}' has unregistered type '{type_name}'")]
    UnregisteredAlgorithmType { name: String, type_name: String },

    #[error("load balancer '{name}' has unregistered type '{type_name}'")]
    UnregisteredLoadBalancerType { name: String, type_name: String },

    #[error("persistence.path must not be empty")]
    EmptyPersistencePath,

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate the whole application config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let registry = AlgorithmTypeRegistry::from_config(&config.algorithm_types);
    let mut errors = validate_rule_config(&config.traffic, &registry);

    if config.persistence.enabled && config.persistence.path.trim().is_empty() {
        errors.push(ValidationError::EmptyPersistencePath);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a traffic rule configuration for referential integrity.
pub fn validate_rule_config(
    config: &TrafficRuleConfig,
    registry: &dyn AlgorithmRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for strategy in &config.strategies {
        if !seen.insert(strategy.name.as_str()) {
            errors.push(ValidationError::DuplicateStrategy(strategy.name.clone()));
        }
        if !config.algorithms.contains_key(&strategy.algorithm_name) {
            errors.push(ValidationError::UnknownAlgorithm {
                strategy: strategy.name.clone(),
                algorithm: strategy.algorithm_name.clone(),
            });
        }
        if let Some(load_balancer) = strategy.load_balancer() {
            if !config.load_balancers.contains_key(load_balancer) {
                errors.push(ValidationError::UnknownLoadBalancer {
                    strategy: strategy.name.clone(),
                    load_balancer: load_balancer.to_string(),
                });
            }
        }
    }

    let referenced = config.referenced_load_balancers();
    for name in config.load_balancers.keys() {
        if !referenced.contains(name.as_str()) {
            errors.push(ValidationError::OrphanLoadBalancer(name.clone()));
        }
    }

    for (name, algorithm) in &config.algorithms {
        if !registry.contains_algorithm(&algorithm.type_name) {
            errors.push(ValidationError::UnregisteredAlgorithmType {
                name: name.clone(),
                type_name: algorithm.type_name.clone(),
            });
        }
    }
    for (name, load_balancer) in &config.load_balancers {
        if !registry.contains_load_balancer(&load_balancer.type_name) {
            errors.push(ValidationError::UnregisteredLoadBalancerType {
                name: name.clone(),
                type_name: load_balancer.type_name.clone(),
            });
        }
    }

    errors
}
