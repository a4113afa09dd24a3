//! Gateway error taxonomy and JSON rendering.
//!
//! # Responsibilities
//! - Define the closed set of failures a request can surface
//! - Map each failure to its HTTP status code
//! - Render exactly one `{"status", "message"}` JSON body per failed request
//!
//! # Design Decisions
//! - Typed variants instead of untyped throws; callers cannot ignore them
//! - `Internal` renders a fixed generic message, never the underlying cause
//! - Rendering happens once, at the axum `IntoResponse` boundary

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

/// Errors that can surface while processing a request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No route pattern matched the request path.
    #[error("no route matched the request path")]
    NoMatch,

    /// Authentication failed on a route that requires it.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Authenticated, but the caller lacks the required role.
    #[error("forbidden: required role '{required}'")]
    Forbidden { required: String },

    /// No live instance for the target service, or the connection failed.
    #[error("upstream service unavailable")]
    UpstreamUnavailable,

    /// The upstream did not respond within the configured timeout.
    #[error("upstream response timed out")]
    UpstreamTimeout,

    /// Any unexpected failure not otherwise classified.
    #[error("internal gateway error")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NoMatch => StatusCode::NOT_FOUND,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Forbidden { .. } => StatusCode::FORBIDDEN,
            GatewayError::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-visible message. `Internal` never exposes its cause.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Internal(_) => "internal gateway error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Wire format of the error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The internal cause is logged here and nowhere else; the body only
        // carries the public message.
        match &self {
            GatewayError::Internal(cause) => {
                tracing::error!(status = status.as_u16(), cause = %cause, "request failed");
            }
            GatewayError::Unauthorized(reason) => {
                tracing::warn!(status = status.as_u16(), reason = %reason, "request rejected");
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "request failed");
            }
        }

        let body = ErrorBody {
            status: status.as_u16(),
            message: self.public_message(),
        };

        let json = serde_json::to_string(&body)
            .unwrap_or_else(|_| format!("{{\"status\": {}, \"message\": \"internal gateway error\"}}", status.as_u16()));

        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(GatewayError::NoMatch.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            GatewayError::Unauthorized(AuthError::Missing).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::Forbidden { required: "ADMIN".into() }.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::UpstreamUnavailable.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::UpstreamTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            GatewayError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = GatewayError::Internal("connection pool poisoned".into());
        assert_eq!(err.public_message(), "internal gateway error");
        assert!(!err.public_message().contains("poisoned"));
    }

    #[test]
    fn test_body_shape() {
        let body = ErrorBody {
            status: 404,
            message: "no route matched the request path".into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            "{\"status\":404,\"message\":\"no route matched the request path\"}"
        );
    }
}
