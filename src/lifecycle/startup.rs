//! Startup orchestration.
//!
//! # Responsibilities
//! - Register algorithm types (built-ins plus config plugins)
//! - Open the metadata store, if enabled
//! - Build the RuleRegistry from stored metadata or the bootstrap rule

use std::sync::Arc;

use thiserror::Error;

use crate::algorithm::AlgorithmTypeRegistry;
use crate::alter::AlterTrafficRuleHandler;
use crate::config::schema::AppConfig;
use crate::config::validation::{validate_rule_config, ValidationError};
use crate::persist::{FilePersister, PersistError};
use crate::registry::RuleRegistry;

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Metadata store unreadable: {0}")]
    Persist(#[from] PersistError),

    #[error("Stored traffic rule is invalid: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))]
    InvalidMetadata(Vec<ValidationError>),
}

/// Initialized subsystems.
pub struct Runtime {
    pub config: AppConfig,
    pub registry: Arc<RuleRegistry>,
    pub algorithms: Arc<AlgorithmTypeRegistry>,
    pub persister: Option<Arc<FilePersister>>,
}

impl Runtime {
    /// Alteration handler wired to this runtime's registry and store.
    pub fn handler(&self) -> AlterTrafficRuleHandler {
        let handler = AlterTrafficRuleHandler::new(self.registry.clone(), self.algorithms.clone());
        match &self.persister {
            Some(persister) => handler.with_persister(persister.clone()),
            None => handler,
        }
    }
}

/// Build the runtime from a validated config.
pub fn bootstrap(config: AppConfig) -> Result<Runtime, StartupError> {
    let algorithms = Arc::new(AlgorithmTypeRegistry::from_config(&config.algorithm_types));

    let persister = config
        .persistence
        .enabled
        .then(|| Arc::new(FilePersister::new(&config.persistence.path)));

    let stored = match &persister {
        Some(persister) => persister.load()?,
        None => None,
    };

    let initial = match stored {
        Some(stored) => {
            let errors = validate_rule_config(&stored, &*algorithms);
            if !errors.is_empty() {
                return Err(StartupError::InvalidMetadata(errors));
            }
            tracing::info!(
                strategies = stored.strategies.len(),
                "Traffic rule loaded from metadata store"
            );
            stored
        }
        None => {
            tracing::info!(
                strategies = config.traffic.strategies.len(),
                "Traffic rule loaded from config file"
            );
            config.traffic.clone()
        }
    };

    Ok(Runtime {
        registry: Arc::new(RuleRegistry::new(initial)),
        algorithms,
        persister,
        config,
    })
}
