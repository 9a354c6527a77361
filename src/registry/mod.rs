//! Active rule registry.
//!
//! # Data Flow
//! ```text
//! Bootstrap:
//!     validated TrafficRuleConfig → RuleRegistry::new (version 1)
//!
//! Alteration / reload:
//!     merged TrafficRuleConfig
//!     → RuleSnapshot { TrafficRule, raw config } built off to the side
//!     → atomic swap of Arc<RuleSnapshot>
//!     → readers observe new snapshot on next load
//! ```
//!
//! # Design Decisions
//! - The rule instance and the raw configuration are two views of one
//!   snapshot, so they are always swapped together
//! - Readers never lock (arc-swap)
//! - Writers are serialized by the caller

pub mod snapshot;

pub use snapshot::{RuleRegistry, RuleSnapshot};
