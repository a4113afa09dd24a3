//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request cookies
//!     → access_token cookie value (may be absent)
//!     → validator.rs (signature + expiry check, claim extraction)
//!     → Ok(Claims { subject, role? })
//!     → identity attributes + X-User-Id header on the outbound overlay
//!
//! On failure:
//!     → typed AuthError (missing / expired / malformed / bad signature
//!       / missing claim)
//!     → pipeline converts to 401 ErrorDescriptor
//! ```
//!
//! # Design Decisions
//! - Symmetric HS256 key derived once at startup; shared read-only
//! - A missing token on an auth-required route is a failure, never a
//!   default "guest" identity
//! - The validator returns `Result`, never a boolean callers could ignore

pub mod validator;

pub use validator::{AuthError, Claims, JwtValidator, ACCESS_TOKEN_COOKIE};
