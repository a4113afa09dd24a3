//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → dispatcher.rs
//!         match path against RouteTable      (miss → 404)
//!         run FilterPipeline                 (auth failure → 401/403)
//!         resolve target via UpstreamResolver (miss → 502)
//!         forward with connect + response timeouts (expiry → 504)
//!     → relay upstream status/headers/body verbatim
//! ```
//!
//! # Design Decisions
//! - The dispatcher owns the outbound hyper client; the connect timeout
//!   lives on the connector, the response timeout wraps the call
//! - Upstream failures are a distinct class from authentication failures
//! - Dropping the handler future (client disconnect) cancels the
//!   in-flight upstream call

pub mod dispatcher;

pub use dispatcher::Dispatcher;
