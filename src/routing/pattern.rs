//! Segment route patterns.
//!
//! # Grammar
//! - `/literal`   required literal segment
//! - `/:name`     required parameter, matches exactly one non-empty segment
//! - `[/:name]`   optional parameter (literals may be optional too)
//! - `/`          alone, matches the root path only
//!
//! Optional parts may only be followed by optional parts, so a path with `n`
//! segments binds to the first `n` parts of the pattern.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("expected '/' at offset {0}")]
    MissingLeadingSlash(usize),
    #[error("unterminated optional group")]
    UnterminatedOptional,
    #[error("optional groups cannot be nested")]
    NestedOptional,
    #[error("unexpected ']' at offset {0}")]
    UnexpectedBracket(usize),
    #[error("optional group '[{0}]' must hold exactly one segment")]
    InvalidOptionalGroup(String),
    #[error("empty segment at offset {0}")]
    EmptySegment(usize),
    #[error("parameter name at offset {0} is empty or not alphanumeric")]
    InvalidParameter(usize),
    #[error("required segment '{0}' follows an optional one")]
    RequiredAfterOptional(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    segment: Segment,
    optional: bool,
}

/// A compiled segment pattern such as `/:any[/:any]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPattern {
    source: String,
    parts: Vec<Part>,
    required: usize,
}

/// Splits a request path into its non-empty segments.
///
/// Repeated and trailing slashes do not produce segments, so `/`, `//` and
/// `` all decompose to nothing.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

impl SegmentPattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }

        if source == "/" {
            return Ok(Self {
                source: source.to_string(),
                parts: Vec::new(),
                required: 0,
            });
        }

        let mut parts: Vec<Part> = Vec::new();
        let mut offset: usize = 0;

        while offset < source.len() {
            let rest: &str = &source[offset..];

            if let Some(group) = rest.strip_prefix('[') {
                let end: usize = group.find(']').ok_or(PatternError::UnterminatedOptional)?;
                let inner: &str = &group[..end];

                if inner.contains('[') {
                    return Err(PatternError::NestedOptional);
                }
                if !inner.starts_with('/') || inner[1..].contains('/') {
                    return Err(PatternError::InvalidOptionalGroup(inner.to_string()));
                }

                let segment: Segment = parse_segment(&inner[1..], offset + 2)?;
                parts.push(Part { segment, optional: true });
                offset += end + 2;
                continue;
            }

            if rest.starts_with(']') {
                return Err(PatternError::UnexpectedBracket(offset));
            }
            if !rest.starts_with('/') {
                return Err(PatternError::MissingLeadingSlash(offset));
            }

            let body_end: usize = rest[1..]
                .find(|c: char| c == '/' || c == '[' || c == ']')
                .map_or(rest.len(), |i| i + 1);
            let body: &str = &rest[1..body_end];

            if parts.iter().any(|p| p.optional) {
                return Err(PatternError::RequiredAfterOptional(format!("/{body}")));
            }

            let segment: Segment = parse_segment(body, offset + 1)?;
            parts.push(Part { segment, optional: false });
            offset += body_end;
        }

        let required: usize = parts.iter().filter(|p| !p.optional).count();

        Ok(Self {
            source: source.to_string(),
            parts,
            required,
        })
    }

    /// Fewest segments a matching path may have.
    pub fn min_segments(&self) -> usize {
        self.required
    }

    /// Most segments a matching path may have.
    pub fn max_segments(&self) -> usize {
        self.parts.len()
    }

    /// Matches pre-split segments, returning the captured parameters in order.
    ///
    /// A parameter name used more than once yields one capture per occurrence.
    pub fn match_segments(&self, segments: &[&str]) -> Option<Vec<(String, String)>> {
        if segments.len() < self.required || segments.len() > self.parts.len() {
            return None;
        }

        let mut captures: Vec<(String, String)> = Vec::new();

        for (part, value) in self.parts.iter().zip(segments) {
            match &part.segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => captures.push((name.clone(), (*value).to_string())),
            }
        }

        Some(captures)
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segment(body: &str, offset: usize) -> Result<Segment, PatternError> {
    if body.is_empty() {
        return Err(PatternError::EmptySegment(offset));
    }

    match body.strip_prefix(':') {
        Some(name) => {
            let valid: bool = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if valid {
                Ok(Segment::Param(name.to_string()))
            } else {
                Err(PatternError::InvalidParameter(offset))
            }
        }
        None => Ok(Segment::Literal(body.to_string())),
    }
}
