// src/models/identifier.rs

//! Normalized page URLs.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::url::file_stem;

/// A normalized URL naming exactly one crawlable page.
///
/// Query string, fragment and trailing slashes are stripped; scheme, host
/// and path are kept. The site root keeps its single `/` because special
/// schemes cannot carry an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Url);

impl Identifier {
    /// Parse and normalize an absolute URL string.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self::from_url(Url::parse(input.trim())?))
    }

    /// Normalize an already parsed URL.
    pub fn from_url(mut url: Url) -> Self {
        url.set_query(None);
        url.set_fragment(None);
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        Self(url)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// True when both identifiers live on exactly the same host.
    pub fn same_host(&self, other: &Identifier) -> bool {
        match (self.host(), other.host()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Output file name for this page, e.g. `guide_intro.md` or `index.md`.
    pub fn file_name(&self) -> String {
        format!("{}.md", file_stem(self.path()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Identifier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_fragment_and_trailing_slash() {
        let id = Identifier::parse("https://docs.example.com/guide/intro/?tab=1#setup").unwrap();
        assert_eq!(id.as_str(), "https://docs.example.com/guide/intro");
    }

    #[test]
    fn equivalent_forms_are_equal() {
        let a = Identifier::parse("https://docs.example.com/guide/").unwrap();
        let b = Identifier::parse("https://docs.example.com/guide#top").unwrap();
        let c = Identifier::parse("https://docs.example.com/guide?x=y").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn root_keeps_single_slash() {
        let a = Identifier::parse("https://docs.example.com").unwrap();
        let b = Identifier::parse("https://docs.example.com/").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "https://docs.example.com/");
        assert_eq!(a.file_name(), "index.md");
    }

    #[test]
    fn same_host_is_exact() {
        let root = Identifier::parse("https://site.example.com/").unwrap();
        let page = Identifier::parse("https://site.example.com/a/b").unwrap();
        let other = Identifier::parse("https://other.example.com/x").unwrap();
        let sub = Identifier::parse("https://api.site.example.com/").unwrap();
        assert!(root.same_host(&page));
        assert!(!root.same_host(&other));
        assert!(!root.same_host(&sub));
    }

    #[test]
    fn file_name_from_path() {
        let id = Identifier::parse("https://docs.example.com/guide/getting-started/").unwrap();
        assert_eq!(id.file_name(), "guide_getting-started.md");
    }

    #[test]
    fn rejects_relative_input() {
        assert!(Identifier::parse("/guide").is_err());
    }
}
