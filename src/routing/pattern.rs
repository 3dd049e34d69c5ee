//! Route pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse pattern strings (`/blog/:id`) into typed segments
//! - Match split request paths against patterns positionally
//! - Capture dynamic parameter values on match
//!
//! # Design Decisions
//! - Tagged segments (`Literal` | `Param`) compared positionally; no regex,
//!   so matching is a straightforward structural comparison with no dispatch
//!   ambiguity
//! - A `:param` segment matches exactly one non-empty path segment
//! - Matching is case-sensitive

use thiserror::Error;

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text that must match exactly.
    Literal(String),
    /// Named parameter matching any single non-empty segment.
    Param(String),
}

/// Errors from parsing a pattern string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern {0:?} contains an empty segment")]
    EmptySegment(String),

    #[error("pattern {0:?} contains a parameter with no name")]
    UnnamedParam(String),
}

/// A parsed route pattern: an ordered sequence of literal and parameter
/// segments. The root pattern `/` has no segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern string such as `/`, `/another`, or `/blog/:id`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        }

        // "/" → no segments; "/a/b" → ["a", "b"]. A trailing slash in the
        // pattern itself would read as an empty segment and is rejected.
        let body = &raw[1..];
        let mut segments = Vec::new();
        if !body.is_empty() {
            for part in body.split('/') {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                }
                if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(PatternError::UnnamedParam(raw.to_string()));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Literal(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this pattern contains any parameter segment.
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Param(_)))
    }

    /// Match a request path split into segments. Returns the captured
    /// parameter values (pattern order) on success.
    pub fn matches<'p>(&self, path_segments: &[&'p str]) -> Option<Vec<(&str, &'p str)>> {
        if path_segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, value) in self.segments.iter().zip(path_segments) {
            match segment {
                Segment::Literal(text) => {
                    if text != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.push((name.as_str(), *value));
                }
            }
        }
        Some(params)
    }

    /// Whether some concrete path could match both this pattern and `other`.
    ///
    /// Used at manifest construction to warn about ambiguous dynamic routes;
    /// per-request resolution settles such overlaps by manifest order.
    pub fn overlaps(&self, other: &RoutePattern) -> bool {
        if self.segments.len() != other.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(&other.segments)
            .all(|(a, b)| match (a, b) {
                (Segment::Literal(x), Segment::Literal(y)) => x == y,
                _ => true,
            })
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
