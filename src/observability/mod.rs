//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! auth + http subsystems produce:
//!     → tracing events (structured fields: method, path, request_id, trace_id)
//!     → metrics.rs (counters, histograms through the `metrics` facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host application installs
//!     → logging.rs installs a subscriber for the CLI and demos
//! ```
//!
//! # Design Decisions
//! - The library never installs a global subscriber or recorder
//! - Bearer tokens and API secrets never appear in events
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
