//! Resolver trait seam.

use url::Url;

/// One live upstream address for a logical service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Logical service name this address belongs to.
    pub service: String,
    /// `host:port` authority of the instance.
    pub authority: String,
}

impl Upstream {
    /// Validate and build an upstream address. The authority must form a
    /// parseable http URL.
    pub fn new(service: &str, authority: &str) -> Result<Self, url::ParseError> {
        Url::parse(&format!("http://{authority}"))?;
        Ok(Self {
            service: service.to_string(),
            authority: authority.to_string(),
        })
    }
}

/// Resolves a logical service name to one live upstream address.
///
/// Load-balancing internals live behind this seam; the gateway only
/// requires that a resolved address is live at selection time.
pub trait UpstreamResolver: Send + Sync + std::fmt::Debug {
    /// Return one address for `service`, or None when the service is
    /// unknown or has no live instances.
    fn resolve(&self, service: &str) -> Option<Upstream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_validates_authority() {
        assert!(Upstream::new("USER-SERVICE", "127.0.0.1:8081").is_ok());
        assert!(Upstream::new("USER-SERVICE", "user-service-1:8080").is_ok());
        assert!(Upstream::new("USER-SERVICE", "not a host").is_err());
    }
}
