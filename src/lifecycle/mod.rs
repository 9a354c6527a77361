//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     AppConfig → algorithm types → metadata store → RuleRegistry
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C → Shutdown::trigger → reload loop exits
//! ```
//!
//! # Design Decisions
//! - Fail fast: an unreadable or invalid metadata store is fatal at startup
//! - The metadata store wins over the config file's bootstrap rule

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, Runtime, StartupError};
