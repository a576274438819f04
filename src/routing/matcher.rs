//! Route pattern matching logic.
//!
//! # Responsibilities
//! - Compile a pattern string into segments
//! - Match a location path against the compiled segments
//! - Extract positional parameters
//!
//! # Design Decisions
//! - Matching is case-sensitive
//! - `:name` captures exactly one non-empty segment
//! - `*` is only allowed last and captures the non-empty remainder
//! - One trailing slash on the location is ignored
//! - No regex to guarantee O(n) matching

use thiserror::Error;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must start with '/': {0:?}")]
    MissingLeadingSlash(String),

    #[error("pattern {0:?} contains an empty segment")]
    EmptySegment(String),

    #[error("pattern {0:?} has a parameter without a name")]
    UnnamedParam(String),

    #[error("pattern {0:?} uses '*' before its last segment")]
    MisplacedSplat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Splat,
}

/// A compiled route pattern such as `/users/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_string()))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            let parts: Vec<&str> = rest.split('/').collect();
            let last = parts.len() - 1;
            for (i, part) in parts.into_iter().enumerate() {
                let segment = match part {
                    "" => return Err(PatternError::EmptySegment(pattern.to_string())),
                    "*" if i == last => Segment::Splat,
                    "*" => return Err(PatternError::MisplacedSplat(pattern.to_string())),
                    ":" => return Err(PatternError::UnnamedParam(pattern.to_string())),
                    p => match p.strip_prefix(':') {
                        Some(name) => Segment::Param(name.to_string()),
                        None => Segment::Literal(p.to_string()),
                    },
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a location path. Returns the captured params on success.
    pub fn captures(&self, location: &str) -> Option<Vec<String>> {
        let trimmed = location.strip_prefix('/').unwrap_or(location);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut params = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Splat => {
                    let rest = parts.get(i..).filter(|r| !r.is_empty())?;
                    params.push(rest.join("/"));
                    return Some(params);
                }
                Segment::Literal(lit) => {
                    if parts.get(i) != Some(&lit.as_str()) {
                        return None;
                    }
                }
                Segment::Param(_) => {
                    let value = parts.get(i).filter(|p| !p.is_empty())?;
                    params.push(value.to_string());
                }
            }
        }

        if parts.len() == self.segments.len() {
            Some(params)
        } else {
            None
        }
    }
}
