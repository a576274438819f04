//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver, synchronizer, event bus, service produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - `debug = true` in the config turns on debug logs for this crate only
//! - Metrics calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
