//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry/ and db/ produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (database name, node count, elapsed)
//! - Metrics go through the `metrics` facade; no exporter is bundled
//! - Lookups only bump a counter; nothing is logged per query

pub mod logging;
pub mod metrics;
