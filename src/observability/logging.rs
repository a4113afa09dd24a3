//! Structured logging initialization.
//!
//! # Responsibilities
//! - Install the global tracing subscriber once at startup
//! - Respect RUST_LOG, falling back to the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to
/// the gateway and tower_http targets.
pub fn init_logging(log_level: &str) {
    let fallback = format!("api_gateway={log_level},tower_http={log_level}");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
