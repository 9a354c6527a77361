//! Traffic rule alteration for the proxy.
//!
//! Validates a partial `ALTER TRAFFIC RULE` request against the live rule,
//! merges it, swaps the result into the shared registry and persists it.

pub mod algorithm;
pub mod alter;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod persist;
pub mod registry;
pub mod rule;

pub use alter::{AlterError, AlterOutcome, AlterTrafficRuleHandler};
pub use config::AppConfig;
pub use registry::RuleRegistry;
pub use rule::TrafficRuleConfig;
