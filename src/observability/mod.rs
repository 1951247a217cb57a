//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Tier handlers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (url, status, tier, kind, request_id) on every failure
//! - Request ID flows through every tier of the chain
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
