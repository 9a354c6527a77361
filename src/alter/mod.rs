//! Traffic rule alteration.
//!
//! # Data Flow
//! ```text
//! DeltaSegment[] (already parsed)
//!     → validator.rs (strategies exist, algorithm types registered)
//!     → rule::segment (normalize into a configuration delta)
//!     → merger.rs (replace-by-name, overlay, load balancer GC)
//!     → registry::RuleRegistry::publish (atomic swap)
//!     → persist::ConfigPersister (optional, after publish)
//! ```
//!
//! # Design Decisions
//! - All-or-nothing up to publish: rejected requests never touch shared state
//! - Persist failure is reported, not rolled back
//! - One in-flight alteration at a time; the caller serializes requests

pub mod error;
pub mod handler;
pub mod merger;
pub mod validator;

pub use error::{AlterError, AlterResult};
pub use handler::{AlterOutcome, AlterTrafficRuleHandler, PersistStatus};
