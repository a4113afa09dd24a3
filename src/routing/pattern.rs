//! Glob-style path patterns.
//!
//! # Responsibilities
//! - Parse patterns like `/api/users/**` at startup
//! - Match request paths segment by segment
//!
//! # Design Decisions
//! - Literal segments match exactly and case-sensitively
//! - A trailing `/**` matches the literal prefix itself and any suffix
//!   (zero or more further segments)
//! - A pattern never matches a path with fewer segments than its
//!   literal prefix

use thiserror::Error;

/// Errors raised while parsing a pattern at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("pattern '{0}': '**' is only allowed as the final segment")]
    WildcardNotTrailing(String),
}

/// A compiled path pattern: literal segments plus an optional trailing
/// `**` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    literals: Vec<String>,
    wildcard: bool,
    source: String,
}

impl PathPattern {
    /// Parse a pattern string. Called once at startup; request matching
    /// never re-parses.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        };

        let mut literals = Vec::new();
        let mut wildcard = false;

        if !rest.is_empty() {
            let segments: Vec<&str> = rest.split('/').collect();
            for (i, segment) in segments.iter().enumerate() {
                if segment.is_empty() {
                    return Err(PatternError::EmptySegment(pattern.to_string()));
                }
                if *segment == "**" {
                    if i != segments.len() - 1 {
                        return Err(PatternError::WildcardNotTrailing(pattern.to_string()));
                    }
                    wildcard = true;
                } else {
                    literals.push(segment.to_string());
                }
            }
        }

        Ok(Self {
            literals,
            wildcard,
            source: pattern.to_string(),
        })
    }

    /// Returns true if the request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let segments: Vec<&str> = path
            .strip_prefix('/')
            .unwrap_or(path)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() < self.literals.len() {
            return false;
        }
        if !self.wildcard && segments.len() != self.literals.len() {
            return false;
        }

        self.literals
            .iter()
            .zip(segments.iter())
            .all(|(lit, seg)| lit == seg)
    }

    /// The pattern as written in configuration.
    pub fn source(&self) -> &str {
        &self.source
    }
}
