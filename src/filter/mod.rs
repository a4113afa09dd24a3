//! Filter pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! Matched RouteEntry + inbound request
//!     → context.rs (immutable snapshot + outbound overlay)
//!     → pipeline.rs (filters in declared order, exhaustive match)
//!         StripPrefix  → rewrite forwarded path
//!         RequireAuth  → validator → userId attribute + X-User-Id header
//!         RequireRole  → role claim check → userRole + X-User-Role
//!     → Ok(mutated context) or typed failure (short-circuit)
//! ```
//!
//! # Design Decisions
//! - Each stage produces a new context value; nothing shared is mutated
//! - Auth failure stops the pipeline; no later filter runs, nothing forwards
//! - A route without an auth filter passes through anonymously by design

pub mod context;
pub mod pipeline;

pub use context::RequestContext;
pub use pipeline::FilterPipeline;
