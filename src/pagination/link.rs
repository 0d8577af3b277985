//! Link header parsing (RFC 5988 style)
//!
//! Format: `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// URL in angle brackets at the start of an entry
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<([^>]*)>").unwrap());

/// Quoted relation name after `rel=`
static REL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"rel="([^"]*)""#).unwrap());

/// Relation name → URL for one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: HashMap<String, String>,
}

impl LinkSet {
    /// Create an empty link set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a relation, replacing any previous URL for it
    pub fn insert(&mut self, rel: impl Into<String>, url: impl Into<String>) {
        self.links.insert(rel.into(), url.into());
    }

    /// URL for a relation
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// The "next" page URL
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    /// The "prev" page URL
    pub fn prev(&self) -> Option<&str> {
        self.get("prev")
    }

    /// The "first" page URL
    pub fn first(&self) -> Option<&str> {
        self.get("first")
    }

    /// The "last" page URL
    pub fn last(&self) -> Option<&str> {
        self.get("last")
    }

    /// Number of distinct relations
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when the header advertised nothing
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterate over `(rel, url)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse a Link header value into a `LinkSet`
///
/// Every non-empty entry must carry both a bracketed URL and a quoted `rel`.
/// One bad entry fails the whole header: a half-parsed header leaves the
/// pagination state unknown.
pub fn parse_link_header(header: &str) -> Result<LinkSet> {
    let mut links = LinkSet::new();

    for entry in header.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let url = URL_REGEX
            .captures(entry)
            .and_then(|cap| cap.get(1))
            .ok_or_else(|| Error::link_header(entry))?;
        let rel = REL_REGEX
            .captures(entry)
            .and_then(|cap| cap.get(1))
            .ok_or_else(|| Error::link_header(entry))?;

        links.insert(rel.as_str(), url.as_str());
    }

    Ok(links)
}
