//! Durable metadata persistence.
//!
//! # Data Flow
//! ```text
//! Published TrafficRuleConfig (full, not the delta)
//!     → ConfigPersister::persist(config, overwrite = true)
//!     → file.rs (temp file + rename)
//!
//! Startup:
//!     file.rs load() → bootstrap configuration, if present
//! ```
//!
//! # Design Decisions
//! - Optional: deployments without a store skip this step
//! - Runs after publish; a failure is reported, never rolled back

pub mod file;

pub use file::FilePersister;

use thiserror::Error;

use crate::rule::TrafficRuleConfig;

/// Errors from the metadata store.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encode error: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] toml::de::Error),

    /// Write refused because a document exists and overwrite was not requested.
    #[error("Metadata already exists at {0}")]
    AlreadyExists(String),
}

/// Writes the full traffic rule configuration to durable storage.
pub trait ConfigPersister: Send + Sync {
    fn persist(&self, configuration: &TrafficRuleConfig, overwrite: bool) -> Result<(), PersistError>;
}
