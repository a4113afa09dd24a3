//! API gateway request-processing core.
//!
//! For every inbound HTTP request the gateway decides which upstream
//! service receives it, whether the caller is authenticated, what
//! identity is forwarded downstream, and how any failure is rendered as
//! a JSON error response.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
