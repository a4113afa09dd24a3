//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (ordered route scan)
//!     → pattern.rs (evaluate glob patterns)
//!     → Return: matched RouteEntry or None
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Parse patterns, build filter lists
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Registration order is a semantic contract: first match wins,
//!   overlapping patterns resolve by precedence, never merged
//! - No regex in the hot path (segment comparison only)
//! - A miss is a normal `None`, not a crash condition

pub mod pattern;
pub mod table;

pub use pattern::{PathPattern, PatternError};
pub use table::{Filter, RouteEntry, RouteTable};
