//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (referential integrity of the bootstrap rule)
//!     → AppConfig (validated, immutable)
//!     → lifecycle::startup builds the registry from it
//!
//! In watch mode:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → RuleRegistry::publish if the traffic section changed
//! ```
//!
//! # Design Decisions
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A config that fails validation never replaces the running one

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_delta, ConfigError};
pub use schema::{AlgorithmTypesConfig, AppConfig, ObservabilityConfig, PersistenceConfig};
pub use validation::{validate_config, validate_rule_config, ValidationError};
