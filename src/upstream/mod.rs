//! Upstream resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Route matched → target_service identified
//!     → resolver.rs (UpstreamResolver trait seam)
//!     → registry.rs (static instance sets, round-robin rotation)
//!     → Return: one live address or None
//! ```
//!
//! # Design Decisions
//! - The resolver is a trait so deployments can plug in service discovery;
//!   the shipped implementation is a static registry built from config
//! - Selection state is a lock-free atomic cursor per service
//! - Unknown service or empty instance set is a normal None, rendered as
//!   502 by the dispatcher

pub mod registry;
pub mod resolver;

pub use registry::StaticRegistry;
pub use resolver::{Upstream, UpstreamResolver};
