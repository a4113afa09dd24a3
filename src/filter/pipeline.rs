//! Filter execution.
//!
//! # Responsibilities
//! - Run a matched route's filters strictly in declared order
//! - Short-circuit on the first failure
//! - Record identity on the context (attributes + outbound headers)
//!
//! # Design Decisions
//! - The filter set is closed; interpretation is an exhaustive match
//! - Stripping is computed from the original inbound path, so rewriting
//!   is idempotent with respect to filter ordering
//! - Auth failures surface as typed errors, never as sentinel values

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};

use crate::auth::{AuthError, JwtValidator, ACCESS_TOKEN_COOKIE};
use crate::error::GatewayError;
use crate::filter::context::{RequestContext, ATTR_USER_ID, ATTR_USER_ROLE};
use crate::routing::{Filter, RouteEntry};

/// Header carrying the authenticated subject downstream.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated role downstream.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Applies a route's filters to a request context.
pub struct FilterPipeline {
    validator: Arc<JwtValidator>,
}

impl FilterPipeline {
    pub fn new(validator: Arc<JwtValidator>) -> Self {
        Self { validator }
    }

    /// Run all filters in order, producing the mutated context or the
    /// first failure.
    pub fn apply(
        &self,
        route: &RouteEntry,
        ctx: RequestContext,
    ) -> Result<RequestContext, GatewayError> {
        let mut ctx = ctx;
        for filter in &route.filters {
            ctx = match filter {
                Filter::StripPrefix(count) => self.strip_prefix(ctx, *count),
                Filter::RequireAuth => self.require_auth(ctx)?,
                Filter::RequireRole(role) => self.require_role(ctx, role)?,
            };
        }
        Ok(ctx)
    }

    /// Remove the first `count` segments from the forwarded path.
    ///
    /// Always derived from the inbound path, never from a previous
    /// rewrite. Query string and body are untouched.
    fn strip_prefix(&self, ctx: RequestContext, count: usize) -> RequestContext {
        let stripped = strip_segments(ctx.path(), count);
        ctx.with_forward_path(stripped)
    }

    /// Authenticate via the access-token cookie and record the identity.
    fn require_auth(&self, ctx: RequestContext) -> Result<RequestContext, GatewayError> {
        let token = ctx.cookie(ACCESS_TOKEN_COOKIE);
        let claims = self.validator.authenticate(token)?;
        let subject = claims.subject()?.to_string();

        let value = HeaderValue::from_str(&subject).map_err(|_| {
            GatewayError::Internal("token subject is not a valid header value".to_string())
        })?;

        Ok(ctx
            .with_attribute(ATTR_USER_ID, &subject)
            .with_overlay_header(HeaderName::from_static(USER_ID_HEADER), value)
            .with_claims(claims))
    }

    /// Check the role claim against the route's required role.
    ///
    /// Absence of the claim (or of a prior authentication) is 401; a
    /// present-but-different role is 403.
    fn require_role(
        &self,
        ctx: RequestContext,
        required: &str,
    ) -> Result<RequestContext, GatewayError> {
        let Some(claims) = ctx.claims() else {
            return Err(GatewayError::Unauthorized(AuthError::Missing));
        };
        let role = claims.required("role")?.to_string();

        if role != required {
            return Err(GatewayError::Forbidden {
                required: required.to_string(),
            });
        }

        let value = HeaderValue::from_str(&role).map_err(|_| {
            GatewayError::Internal("token role is not a valid header value".to_string())
        })?;

        Ok(ctx
            .with_attribute(ATTR_USER_ROLE, &role)
            .with_overlay_header(HeaderName::from_static(USER_ROLE_HEADER), value))
    }
}

/// Remove the first `count` segments of `path`. Stripping past the last
/// segment yields `/`.
fn strip_segments(path: &str, count: usize) -> String {
    if count == 0 {
        return path.to_string();
    }
    let remaining: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .skip(count)
        .collect();
    if remaining.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", remaining.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};

    use crate::auth::Claims;
    use crate::routing::{PathPattern, RouteEntry};

    const SECRET: &str = "test-secret-key-of-at-least-32-bytes!";

    fn pipeline() -> FilterPipeline {
        FilterPipeline::new(Arc::new(JwtValidator::from_secret(SECRET)))
    }

    fn mint(sub: Option<&str>, role: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.map(String::from),
            exp: get_current_timestamp() + 60,
            role: role.map(String::from),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn route(filters: Vec<Filter>) -> RouteEntry {
        RouteEntry {
            id: "users".into(),
            patterns: vec![PathPattern::parse("/api/users/**").unwrap()],
            target_service: "USER-SERVICE".into(),
            strip_count: 1,
            filters,
        }
    }

    fn ctx(path: &str, cookie: Option<&str>) -> RequestContext {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (parts, _) = builder.body(Body::empty()).unwrap().into_parts();
        RequestContext::from_parts(&parts)
    }

    #[test]
    fn test_strip_prefix_round_trip() {
        let route = route(vec![Filter::StripPrefix(1)]);
        let out = pipeline().apply(&route, ctx("/api/users/42", None)).unwrap();
        assert_eq!(out.forward_path(), "/users/42");

        let zero = route_with_strip(0);
        let out = pipeline().apply(&zero, ctx("/api/users/42", None)).unwrap();
        assert_eq!(out.forward_path(), "/api/users/42");
    }

    fn route_with_strip(count: usize) -> RouteEntry {
        route(vec![Filter::StripPrefix(count)])
    }

    #[test]
    fn test_strip_past_last_segment_yields_root() {
        let route = route_with_strip(5);
        let out = pipeline().apply(&route, ctx("/api/users", None)).unwrap();
        assert_eq!(out.forward_path(), "/");
    }

    #[test]
    fn test_strip_is_idempotent_across_reapplication() {
        let route = route(vec![Filter::StripPrefix(1), Filter::StripPrefix(1)]);
        let out = pipeline().apply(&route, ctx("/api/users/42", None)).unwrap();
        // stripping derives from the inbound path, so a repeated filter
        // does not strip twice
        assert_eq!(out.forward_path(), "/users/42");
    }

    #[test]
    fn test_auth_success_sets_identity() {
        let token = mint(Some("alice"), None);
        let route = route(vec![Filter::StripPrefix(1), Filter::RequireAuth]);
        let cookie = format!("access_token={token}");
        let out = pipeline().apply(&route, ctx("/api/users/42", Some(&cookie))).unwrap();

        assert_eq!(out.attribute(ATTR_USER_ID), Some("alice"));
        assert_eq!(out.overlay().get(USER_ID_HEADER).unwrap(), "alice");
        assert_eq!(out.forward_path(), "/users/42");
    }

    #[test]
    fn test_auth_failure_short_circuits() {
        let route = route(vec![Filter::RequireAuth, Filter::StripPrefix(1)]);
        let err = pipeline()
            .apply(&route, ctx("/api/users/42", None))
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Unauthorized(AuthError::Missing)
        ));
    }

    #[test]
    fn test_pipeline_is_idempotent_for_same_token() {
        let token = mint(Some("alice"), None);
        let route = route(vec![Filter::StripPrefix(1), Filter::RequireAuth]);
        let cookie = format!("access_token={token}");

        let first = pipeline().apply(&route, ctx("/api/users/42", Some(&cookie))).unwrap();
        let second = pipeline().apply(&route, ctx("/api/users/42", Some(&cookie))).unwrap();
        assert_eq!(first.attribute(ATTR_USER_ID), second.attribute(ATTR_USER_ID));
    }

    #[test]
    fn test_role_match_sets_role_identity() {
        let token = mint(Some("alice"), Some("ADMIN"));
        let route = route(vec![
            Filter::StripPrefix(1),
            Filter::RequireAuth,
            Filter::RequireRole("ADMIN".into()),
        ]);
        let cookie = format!("access_token={token}");
        let out = pipeline().apply(&route, ctx("/api/admin/users", Some(&cookie))).unwrap();

        assert_eq!(out.attribute(ATTR_USER_ROLE), Some("ADMIN"));
        assert_eq!(out.overlay().get(USER_ROLE_HEADER).unwrap(), "ADMIN");
    }

    #[test]
    fn test_role_mismatch_is_forbidden() {
        let token = mint(Some("alice"), Some("MEMBER"));
        let route = route(vec![
            Filter::RequireAuth,
            Filter::RequireRole("ADMIN".into()),
        ]);
        let cookie = format!("access_token={token}");
        let err = pipeline()
            .apply(&route, ctx("/api/admin/users", Some(&cookie)))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Forbidden { .. }));
    }

    #[test]
    fn test_role_claim_absent_is_unauthorized() {
        let token = mint(Some("alice"), None);
        let route = route(vec![
            Filter::RequireAuth,
            Filter::RequireRole("ADMIN".into()),
        ]);
        let cookie = format!("access_token={token}");
        let err = pipeline()
            .apply(&route, ctx("/api/admin/users", Some(&cookie)))
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Unauthorized(AuthError::MissingClaim(_))
        ));
    }

    #[test]
    fn test_anonymous_route_sets_no_identity() {
        let route = route(vec![Filter::StripPrefix(1)]);
        let out = pipeline().apply(&route, ctx("/api/auth/login", None)).unwrap();
        assert_eq!(out.attribute(ATTR_USER_ID), None);
        assert!(out.overlay().get(USER_ID_HEADER).is_none());
    }
}
