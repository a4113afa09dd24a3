//! Per-request context.
//!
//! # Responsibilities
//! - Snapshot the inbound request (method, path, query, headers, cookies)
//! - Carry the outbound header overlay and derived identity attributes
//! - Carry the forwarded path as rewritten by the pipeline
//!
//! # Design Decisions
//! - Owned by exactly one in-flight request; never shared across requests
//! - Mutation methods consume and return the context, so every pipeline
//!   stage hands on a new value instead of editing shared state
//! - Cookies are parsed once at construction; first occurrence wins

use std::collections::HashMap;

use axum::http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, Method};

use crate::auth::Claims;

/// Attribute key for the authenticated subject.
pub const ATTR_USER_ID: &str = "userId";
/// Attribute key for the authenticated role.
pub const ATTR_USER_ROLE: &str = "userRole";

/// Snapshot of one inbound request plus the outbound overlay.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    cookies: HashMap<String, String>,

    forward_path: String,
    overlay: HeaderMap,
    attributes: HashMap<String, String>,
    claims: Option<Claims>,
}

impl RequestContext {
    /// Build a context from parsed request head parts.
    pub fn from_parts(parts: &Parts) -> Self {
        let path = parts.uri.path().to_string();
        let query = parts.uri.query().map(str::to_string);
        let cookies = parse_cookies(&parts.headers);
        Self {
            method: parts.method.clone(),
            forward_path: path.clone(),
            path,
            query,
            headers: parts.headers.clone(),
            cookies,
            overlay: HeaderMap::new(),
            attributes: HashMap::new(),
            claims: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The inbound path, as received. Never rewritten.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The path that will be forwarded upstream.
    pub fn forward_path(&self) -> &str {
        &self.forward_path
    }

    /// Headers added by the pipeline for the upstream request.
    pub fn overlay(&self) -> &HeaderMap {
        &self.overlay
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Claims verified earlier in the same pipeline run, if any.
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn with_forward_path(mut self, path: String) -> Self {
        self.forward_path = path;
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_overlay_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.overlay.insert(name, value);
        self
    }

    pub fn with_claims(mut self, claims: Claims) -> Self {
        self.claims = Some(claims);
        self
    }
}

/// Parse all `Cookie` headers into a name → value map.
fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                cookies
                    .entry(name.trim().to_string())
                    .or_insert_with(|| value.trim().to_string());
            }
        }
    }
    cookies
}
