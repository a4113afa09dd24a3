//! Lifecycle subsystem.
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every
//!   long-running task
//! - Ctrl+C is translated into the same signal as programmatic shutdown

pub mod shutdown;

pub use shutdown::Shutdown;
