//! Semantic configuration checks.
//!
//! # Responsibilities
//! - Reject configs that would fail at request time
//! - Keep syntactic (serde) and semantic errors separate
//!
//! # Design Decisions
//! - All problems are collected and reported together, not one at a time
//! - A missing timeout policy is a defect, so zero timeouts are rejected

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::routing::PathPattern;

/// HS256 needs at least 256 bits of key material.
const MIN_SECRET_BYTES: usize = 32;

/// One semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener bind_address '{0}' is not a valid socket address")]
    BadBindAddress(String),

    #[error("auth.secret must be at least {MIN_SECRET_BYTES} bytes")]
    WeakSecret,

    #[error("no routes configured")]
    NoRoutes,

    #[error("route '{0}' declares no path patterns")]
    RouteWithoutPatterns(String),

    #[error("route '{route}': {problem}")]
    BadPattern { route: String, problem: String },

    #[error("route '{route}' targets unknown service '{service}'")]
    UnknownTargetService { route: String, service: String },

    #[error("route '{0}' sets required_role without requires_auth")]
    RoleWithoutAuth(String),

    #[error("upstream '{service}' instance '{address}' is not a valid host:port")]
    BadUpstreamAddress { service: String, address: String },

    #[error("timeouts must be non-zero (connect_secs, response_secs, request_secs)")]
    ZeroTimeout,
}

/// Validate the whole config, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.auth.secret.len() < MIN_SECRET_BYTES {
        errors.push(ValidationError::WeakSecret);
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    for route in &config.routes {
        if route.patterns.is_empty() {
            errors.push(ValidationError::RouteWithoutPatterns(route.id.clone()));
        }
        for pattern in &route.patterns {
            if let Err(e) = PathPattern::parse(pattern) {
                errors.push(ValidationError::BadPattern {
                    route: route.id.clone(),
                    problem: e.to_string(),
                });
            }
        }
        if !config
            .upstreams
            .iter()
            .any(|u| u.service == route.target_service)
        {
            errors.push(ValidationError::UnknownTargetService {
                route: route.id.clone(),
                service: route.target_service.clone(),
            });
        }
        if route.required_role.is_some() && !route.requires_auth {
            errors.push(ValidationError::RoleWithoutAuth(route.id.clone()));
        }
    }

    for upstream in &config.upstreams {
        for address in &upstream.instances {
            if Url::parse(&format!("http://{address}")).is_err() {
                errors.push(ValidationError::BadUpstreamAddress {
                    service: upstream.service.clone(),
                    address: address.clone(),
                });
            }
        }
    }

    if config.timeouts.connect_secs == 0
        || config.timeouts.response_secs == 0
        || config.timeouts.request_secs == 0
    {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
