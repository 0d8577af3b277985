//! URL templates with placeholder segments
//!
//! `users/:user/repos` has two literals and one placeholder. Placeholders
//! are filled left to right from the call's positional arguments.

use crate::error::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Regex for a placeholder segment: `:name`
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([a-zA-Z_][a-zA-Z0-9_]*)$").unwrap());

/// Everything except RFC 3986 unreserved characters
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Passed through unchanged
    Literal(String),
    /// Filled from the next positional argument
    Placeholder(String),
}

impl Segment {
    /// Check if this is a placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// A parsed URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse a template like `repos/:owner/:repo/branches`
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::config("URL template must not be empty"));
        }

        let segments = trimmed
            .split('/')
            .map(|segment| parse_segment(raw, segment))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// The template as written (without surrounding slashes)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of placeholder segments
    pub fn placeholder_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_placeholder()).count()
    }

    /// Placeholder names in order
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute `args` into the placeholders and join with `/`
    ///
    /// Arguments are percent-encoded so `?`, `#` and `%` stay inside the
    /// path. A `/` inside an argument is kept as a separator, but each piece
    /// it produces must be non-empty and must not be `.` or `..`.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        let expected = self.placeholder_count();
        if args.len() != expected {
            return Err(Error::invalid_invocation(format!(
                "template '{}' takes {expected} argument(s), got {}",
                self.raw,
                args.len()
            )));
        }

        let mut args = args.iter();
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => parts.push(text.clone()),
                Segment::Placeholder(name) => {
                    // Counts were checked above
                    let arg = args.next().map_or("", |arg| arg.as_ref());
                    parts.push(encode_argument(name, arg)?);
                }
            }
        }

        Ok(parts.join("/"))
    }
}

/// Percent-encode one argument, piece by piece
fn encode_argument(name: &str, arg: &str) -> Result<String> {
    let pieces = arg
        .split('/')
        .map(|piece| match piece {
            "" | "." | ".." => Err(Error::invalid_invocation(format!(
                "argument for ':{name}' has an invalid path segment '{piece}' in '{arg}'"
            ))),
            _ => Ok(utf8_percent_encode(piece, PATH_SEGMENT_ENCODE_SET).to_string()),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(pieces.join("/"))
}

fn parse_segment(raw: &str, segment: &str) -> Result<Segment> {
    if segment.is_empty() {
        return Err(Error::config(format!(
            "URL template '{raw}' contains an empty segment"
        )));
    }

    if segment.starts_with(':') {
        return PLACEHOLDER_REGEX
            .captures(segment)
            .and_then(|cap| cap.get(1))
            .map(|name| Segment::Placeholder(name.as_str().to_string()))
            .ok_or_else(|| {
                Error::config(format!(
                    "URL template '{raw}' has an invalid placeholder '{segment}'"
                ))
            });
    }

    Ok(Segment::Literal(segment.to_string()))
}

impl FromStr for UrlTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
