//! Route table: ordered entries with first-match-wins lookup.
//!
//! # Responsibilities
//! - Compile route configuration into immutable entries
//! - Look up the first entry whose pattern matches a request path
//!
//! # Design Decisions
//! - Explicitly constructed and passed in at startup; no ambient globals
//! - Duplicate ids are permitted and resolved by registration order
//! - The filter list is a closed tagged enum interpreted by the pipeline

use crate::config::RouteConfig;
use crate::routing::pattern::{PathPattern, PatternError};

/// A request transformation or check applied before forwarding.
///
/// The set is closed by design; the pipeline matches it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Remove the first `n` path segments before forwarding.
    StripPrefix(usize),
    /// Require a valid access token; sets the identity attributes.
    RequireAuth,
    /// Require the `role` claim to equal the given value.
    RequireRole(String),
}

/// One compiled routing rule.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Identifier for logging/metrics; not required to be unique.
    pub id: String,
    /// Patterns evaluated in declared order.
    pub patterns: Vec<PathPattern>,
    /// Logical upstream name, resolved externally.
    pub target_service: String,
    /// Filters executed strictly in this order.
    pub filters: Vec<Filter>,
    /// Leading path segments removed before forwarding.
    pub strip_count: usize,
}

/// Ordered, immutable set of route entries.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Compile the route table from configuration.
    ///
    /// The filter list is always `[StripPrefix, RequireAuth?, RequireRole?]`
    /// so that prefix stripping behaves identically whether or not
    /// authentication runs.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, PatternError> {
        let mut entries = Vec::with_capacity(routes.len());
        for route in routes {
            let patterns = route
                .patterns
                .iter()
                .map(|p| PathPattern::parse(p))
                .collect::<Result<Vec<_>, _>>()?;

            let mut filters = vec![Filter::StripPrefix(route.strip_count)];
            if route.requires_auth {
                filters.push(Filter::RequireAuth);
            }
            if let Some(role) = &route.required_role {
                filters.push(Filter::RequireRole(role.clone()));
            }

            entries.push(RouteEntry {
                id: route.id.clone(),
                patterns,
                target_service: route.target_service.clone(),
                filters,
                strip_count: route.strip_count,
            });
        }
        Ok(Self { entries })
    }

    /// Return the first registered entry whose pattern matches `path`.
    ///
    /// A miss is a normal result; the dispatcher renders it as 404.
    pub fn matches(&self, path: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.patterns.iter().any(|p| p.matches(path)))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, patterns: &[&str], service: &str) -> RouteEntry {
        RouteEntry {
            id: id.to_string(),
            patterns: patterns
                .iter()
                .map(|p| PathPattern::parse(p).unwrap())
                .collect(),
            target_service: service.to_string(),
            filters: vec![Filter::StripPrefix(1)],
            strip_count: 1,
        }
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new(vec![
            entry("users-admin", &["/api/admin/users/**"], "USER-SERVICE"),
            entry("catch-all", &["/api/**"], "FALLBACK-SERVICE"),
        ]);

        let hit = table.matches("/api/admin/users/1").unwrap();
        assert_eq!(hit.id, "users-admin");

        let hit = table.matches("/api/events/9").unwrap();
        assert_eq!(hit.id, "catch-all");
    }

    #[test]
    fn test_registration_order_changes_result_for_overlaps() {
        let forward = RouteTable::new(vec![
            entry("specific", &["/api/users/**"], "USER-SERVICE"),
            entry("broad", &["/api/**"], "FALLBACK-SERVICE"),
        ]);
        let reversed = RouteTable::new(vec![
            entry("broad", &["/api/**"], "FALLBACK-SERVICE"),
            entry("specific", &["/api/users/**"], "USER-SERVICE"),
        ]);

        assert_eq!(forward.matches("/api/users/1").unwrap().id, "specific");
        assert_eq!(reversed.matches("/api/users/1").unwrap().id, "broad");
    }

    #[test]
    fn test_duplicate_ids_resolved_by_order() {
        let table = RouteTable::new(vec![
            entry("USER-SERVICE", &["/api/roles/**"], "USER-SERVICE"),
            entry("USER-SERVICE", &["/api/users/**"], "USER-SERVICE"),
        ]);
        assert!(table.matches("/api/roles/1").is_some());
        assert!(table.matches("/api/users/1").is_some());
    }

    #[test]
    fn test_no_match_is_none() {
        let table = RouteTable::new(vec![entry("users", &["/api/users/**"], "USER-SERVICE")]);
        assert!(table.matches("/unknown/path").is_none());
    }

    #[test]
    fn test_from_config_builds_filter_order() {
        let config = RouteConfig {
            id: "users".into(),
            patterns: vec!["/api/users/**".into()],
            target_service: "USER-SERVICE".into(),
            strip_count: 1,
            requires_auth: true,
            required_role: Some("ADMIN".into()),
        };
        let table = RouteTable::from_config(std::slice::from_ref(&config)).unwrap();
        let entry = table.matches("/api/users/42").unwrap();
        assert_eq!(
            entry.filters,
            vec![
                Filter::StripPrefix(1),
                Filter::RequireAuth,
                Filter::RequireRole("ADMIN".into()),
            ]
        );
    }

    #[test]
    fn test_from_config_rejects_bad_pattern() {
        let config = RouteConfig {
            id: "bad".into(),
            patterns: vec!["no-slash/**".into()],
            target_service: "X".into(),
            strip_count: 0,
            requires_auth: false,
            required_role: None,
        };
        assert!(RouteTable::from_config(std::slice::from_ref(&config)).is_err());
    }
}
