//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counter + latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured key-value logging; request ID flows through all events
//! - Metric updates are cheap (atomic increments)
//! - Absent vs invalid token is visible here, never in client responses
//! - The JWT secret never appears in any event

pub mod logging;
pub mod metrics;
