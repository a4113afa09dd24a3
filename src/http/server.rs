//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the axum Router with the catch-all gateway handler
//! - Wire up middleware (tracing, request timeout, request ID,
//!   concurrency cap)
//! - Assemble the dispatcher from validated configuration
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - The route table, upstream registry, and decoding key are built once
//!   here and passed in explicitly; no ambient/global lookup
//! - The handler is the single error-rendering boundary

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::JwtValidator;
use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::filter::FilterPipeline;
use crate::http::request::RequestIdLayer;
use crate::routing::{PatternError, RouteTable};
use crate::upstream::StaticRegistry;

/// Errors while assembling the server from configuration.
///
/// Reachable only when the config skipped validation; `load_config`
/// rejects these earlier.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route compilation failed: {0}")]
    Route(#[from] PatternError),

    #[error("upstream registry invalid: {0}")]
    Upstream(#[from] url::ParseError),
}

/// Application state injected into the handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Assemble the server from validated configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        let table = Arc::new(RouteTable::from_config(&config.routes)?);
        let registry = Arc::new(StaticRegistry::from_config(&config.upstreams)?);
        let validator = Arc::new(JwtValidator::from_secret(&config.auth.secret));

        let dispatcher = Arc::new(Dispatcher::new(
            table,
            FilterPipeline::new(validator),
            registry,
            &config.timeouts,
        ));

        let state = AppState { dispatcher };
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main gateway handler.
///
/// Feeds the request to the dispatcher and renders any failure as the
/// JSON error contract. Exactly one response body is produced per
/// request.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match state.dispatcher.dispatch(request).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}
