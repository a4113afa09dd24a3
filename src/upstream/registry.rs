//! Static upstream registry with round-robin selection.
//!
//! # Responsibilities
//! - Hold the configured instance set per logical service
//! - Rotate through instances on successive resolutions
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards; shared via Arc
//! - Per-service atomic cursor, relaxed ordering is sufficient

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::UpstreamConfig;
use crate::upstream::resolver::{Upstream, UpstreamResolver};

/// Instances for one logical service plus the rotation cursor.
#[derive(Debug)]
struct ServicePool {
    instances: Vec<Upstream>,
    cursor: AtomicUsize,
}

impl ServicePool {
    fn next(&self) -> Option<Upstream> {
        if self.instances.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.instances.len();
        Some(self.instances[index].clone())
    }
}

/// Upstream registry built from configuration.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    services: HashMap<String, ServicePool>,
}

impl StaticRegistry {
    /// Build the registry, validating every configured address.
    pub fn from_config(upstreams: &[UpstreamConfig]) -> Result<Self, url::ParseError> {
        let mut services = HashMap::new();
        for upstream in upstreams {
            let instances = upstream
                .instances
                .iter()
                .map(|addr| Upstream::new(&upstream.service, addr))
                .collect::<Result<Vec<_>, _>>()?;
            services.insert(
                upstream.service.clone(),
                ServicePool {
                    instances,
                    cursor: AtomicUsize::new(0),
                },
            );
        }
        Ok(Self { services })
    }

    /// True if the service has at least one configured instance.
    pub fn knows(&self, service: &str) -> bool {
        self.services
            .get(service)
            .map(|pool| !pool.instances.is_empty())
            .unwrap_or(false)
    }
}

impl UpstreamResolver for StaticRegistry {
    fn resolve(&self, service: &str) -> Option<Upstream> {
        self.services.get(service).and_then(ServicePool::next)
    }
}
