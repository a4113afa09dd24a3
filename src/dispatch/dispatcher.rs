//! Match → filter → forward orchestration.
//!
//! # Responsibilities
//! - Drive one request through routing, filtering, and forwarding
//! - Rewrite the upstream URI (stripped path + original query)
//! - Record per-request metrics exactly once
//!
//! # Design Decisions
//! - Owns immutable, Arc-shared collaborators; no locks on the hot path
//! - Errors are returned typed; the HTTP layer renders them

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::uri::Scheme;
use axum::http::{Request, Response, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::TimeoutConfig;
use crate::error::GatewayError;
use crate::filter::{FilterPipeline, RequestContext};
use crate::observability::metrics;
use crate::routing::RouteTable;
use crate::upstream::{Upstream, UpstreamResolver};

/// Orchestrates request processing against immutable startup state.
pub struct Dispatcher {
    table: Arc<RouteTable>,
    pipeline: FilterPipeline,
    resolver: Arc<dyn UpstreamResolver>,
    client: Client<HttpConnector, Body>,
    response_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        table: Arc<RouteTable>,
        pipeline: FilterPipeline,
        resolver: Arc<dyn UpstreamResolver>,
        timeouts: &TimeoutConfig,
    ) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            table,
            pipeline,
            resolver,
            client,
            response_timeout: Duration::from_secs(timeouts.response_secs),
        }
    }

    /// Process one request end to end.
    ///
    /// Exactly one metrics record is emitted per call, whether the
    /// request succeeded or failed.
    pub async fn dispatch(&self, request: Request<Body>) -> Result<Response<Body>, GatewayError> {
        let start = Instant::now();
        let method = request.method().to_string();
        let mut service = String::from("none");

        let result = self.run(request, &mut service).await;

        let status = match &result {
            Ok(response) => response.status().as_u16(),
            Err(error) => error.status_code().as_u16(),
        };
        metrics::record_request(&method, status, &service, start);

        result
    }

    async fn run(
        &self,
        request: Request<Body>,
        service: &mut String,
    ) -> Result<Response<Body>, GatewayError> {
        let (parts, body) = request.into_parts();
        let ctx = RequestContext::from_parts(&parts);

        let route = self.table.matches(ctx.path()).ok_or(GatewayError::NoMatch)?;
        *service = route.target_service.clone();

        tracing::debug!(
            route = %route.id,
            path = %ctx.path(),
            target = %route.target_service,
            "Route matched"
        );

        let ctx = self.pipeline.apply(route, ctx)?;

        let upstream = self
            .resolver
            .resolve(&route.target_service)
            .ok_or(GatewayError::UpstreamUnavailable)?;

        self.forward(ctx, upstream, parts.version, body).await
    }

    /// Forward the mutated request and relay the upstream response.
    async fn forward(
        &self,
        ctx: RequestContext,
        upstream: Upstream,
        version: axum::http::Version,
        body: Body,
    ) -> Result<Response<Body>, GatewayError> {
        let path_and_query = match ctx.query() {
            Some(query) => format!("{}?{}", ctx.forward_path(), query),
            None => ctx.forward_path().to_string(),
        };

        let uri = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(upstream.authority.as_str())
            .path_and_query(path_and_query)
            .build()
            .map_err(|e| GatewayError::Internal(format!("upstream URI build failed: {e}")))?;

        let mut builder = Request::builder()
            .method(ctx.method().clone())
            .uri(uri)
            .version(version);

        if let Some(headers) = builder.headers_mut() {
            for (name, value) in ctx.headers() {
                headers.insert(name.clone(), value.clone());
            }
            // identity and other pipeline additions win over inbound headers
            for (name, value) in ctx.overlay() {
                headers.insert(name.clone(), value.clone());
            }
        }

        let request = builder
            .body(body)
            .map_err(|e| GatewayError::Internal(format!("upstream request build failed: {e}")))?;

        match tokio::time::timeout(self.response_timeout, self.client.request(request)).await {
            Err(_elapsed) => {
                tracing::warn!(
                    service = %upstream.service,
                    authority = %upstream.authority,
                    timeout_secs = self.response_timeout.as_secs(),
                    "Upstream response timed out"
                );
                Err(GatewayError::UpstreamTimeout)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    service = %upstream.service,
                    authority = %upstream.authority,
                    error = %e,
                    "Upstream request failed"
                );
                Err(GatewayError::UpstreamUnavailable)
            }
            Ok(Ok(response)) => {
                let (parts, body) = response.into_parts();
                Ok(Response::from_parts(parts, Body::new(body)))
            }
        }
    }
}
