//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! alter/, registry/, config/ produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (alteration counters, snapshot gauges)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Prometheus scrape (watch mode only)
//! ```
//!
//! # Design Decisions
//! - Every alteration runs inside a span carrying its alteration id
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
