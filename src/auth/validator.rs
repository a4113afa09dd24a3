//! JWT validation and claim extraction.
//!
//! # Responsibilities
//! - Verify token signature (HS256) and expiry
//! - Extract the subject and optional named claims
//! - Report failures as a closed, typed error set
//!
//! # Design Decisions
//! - Decoding key built once at startup from the configured secret
//! - Expired is a distinct failure from malformed; the two are never
//!   conflated in logs or taxonomy
//! - A signed, unexpired token without a non-empty subject is still invalid

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authentication failures. All map to HTTP 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token cookie, or an empty/whitespace-only value.
    #[error("missing access token")]
    Missing,

    /// The `exp` claim is in the past.
    #[error("access token expired")]
    Expired,

    /// The token is not a structurally valid JWT.
    #[error("malformed access token")]
    Malformed,

    /// The signature does not verify against the gateway key.
    #[error("access token signature invalid")]
    SignatureInvalid,

    /// Signature and expiry are fine but the subject claim is absent/empty.
    #[error("access token has no subject")]
    MissingSubject,

    /// A claim the route's policy demands is absent.
    #[error("access token missing required claim '{0}'")]
    MissingClaim(String),
}

/// Claims carried by an access token.
///
/// `sub` is optional at the wire level so that a token without a subject
/// still parses; the validator rejects it explicitly afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub role: Option<String>,
}

impl Claims {
    /// The verified, non-empty subject.
    pub fn subject(&self) -> Result<&str, AuthError> {
        match self.sub.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(AuthError::MissingSubject),
        }
    }

    /// A named claim the route's policy requires. Absence is a failure,
    /// not a default.
    pub fn required(&self, name: &str) -> Result<&str, AuthError> {
        let value = match name {
            "role" => self.role.as_deref(),
            _ => None,
        };
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(AuthError::MissingClaim(name.to_string())),
        }
    }
}

/// Verifies access tokens against a process-wide symmetric key.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create a validator from the configured secret string.
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Run the full authentication state machine over an optional token.
    ///
    /// `None` and blank values are `Missing`; everything else goes through
    /// signature and expiry verification and subject extraction.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::Missing),
        };

        let claims = self.verify(token)?;
        claims.subject()?;
        Ok(claims)
    }

    /// Verify signature and expiry, returning the decoded claims.
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                _ => AuthError::Malformed,
            }),
        }
    }
}
