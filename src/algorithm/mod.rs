//! Algorithm type registry.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     built-in types + [algorithm_types] from config
//!     → registry.rs (AlgorithmTypeRegistry)
//!
//! Alteration:
//!     alter/validator.rs asks contains_algorithm / contains_load_balancer
//! ```
//!
//! # Design Decisions
//! - Membership oracle only; instantiating algorithms is not its concern
//! - Trait seam so callers can plug in their own factory lookup

pub mod registry;

pub use registry::AlgorithmTypeRegistry;

/// Answers whether an algorithm type name is known.
pub trait AlgorithmRegistry: Send + Sync {
    /// True if `type_name` is a registered traffic algorithm.
    fn contains_algorithm(&self, type_name: &str) -> bool;

    /// True if `type_name` is a registered load balancer.
    fn contains_load_balancer(&self, type_name: &str) -> bool;
}
