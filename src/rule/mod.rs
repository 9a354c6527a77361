//! Traffic rule model.
//!
//! # Data Flow
//! ```text
//! Bootstrap:
//!     config file / metadata store
//!     → config.rs (TrafficRuleConfig: strategies + algorithm dictionaries)
//!     → traffic_rule.rs (TrafficRule: resolved strategies, label index)
//!
//! Alteration:
//!     parsed statement → DeltaSegment[]
//!     → segment.rs (normalize into a TrafficRuleConfig-shaped delta)
//!     → alter/ (validate, merge, publish)
//! ```
//!
//! # Design Decisions
//! - Configurations are plain values; a published one is never mutated
//! - Dictionaries are insertion-ordered (IndexMap) so output is reproducible
//! - TrafficRule shares the exact Arc it was built from

pub mod config;
pub mod segment;
pub mod traffic_rule;

pub use config::{AlgorithmConfig, StrategyConfig, TrafficRuleConfig};
pub use segment::{AlgorithmSegment, DeltaDocument, DeltaSegment};
pub use traffic_rule::{StrategyRule, TrafficRule};
