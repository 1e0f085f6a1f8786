//! Same-site link discovery.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Identifier;
use crate::utils::resolve_link;

/// Finds links on a page that stay on the crawled site.
pub struct LinkDiscoverer {
    root: Identifier,
    anchors: Selector,
}

impl LinkDiscoverer {
    pub fn new(root: Identifier) -> Result<Self> {
        let anchors =
            Selector::parse("a[href]").map_err(|e| AppError::selector("a[href]", format!("{e:?}")))?;
        Ok(Self { root, anchors })
    }

    /// True when `candidate` is on the root's host.
    pub fn is_same_site(&self, candidate: &Identifier) -> bool {
        self.root.same_host(candidate)
    }

    /// Normalized same-site identifiers linked from `document`.
    ///
    /// Relative destinations are resolved against `page_url`, the URL the
    /// page was actually served from, not the crawl root. Pure in-page
    /// fragments (`#section`) are skipped.
    pub fn discover(&self, document: &Html, page_url: &Url) -> BTreeSet<Identifier> {
        document
            .select(&self.anchors)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty() && !href.starts_with('#'))
            .filter_map(|href| resolve_link(page_url, href))
            .map(Identifier::from_url)
            .filter(|id| self.is_same_site(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discoverer(root: &str) -> LinkDiscoverer {
        LinkDiscoverer::new(Identifier::parse(root).unwrap()).unwrap()
    }

    fn strings(ids: &BTreeSet<Identifier>) -> Vec<&str> {
        ids.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_filters_other_hosts() {
        let links = discoverer("https://site.example.com/");
        let doc = Html::parse_document(
            r#"<a href="https://other.example.com/x">x</a>
               <a href="https://sub.site.example.com/y">y</a>
               <a href="/z">z</a>"#,
        );
        let page = Url::parse("https://site.example.com/").unwrap();
        assert_eq!(
            strings(&links.discover(&doc, &page)),
            vec!["https://site.example.com/z"]
        );
    }

    #[test]
    fn test_skips_fragments_and_non_http() {
        let links = discoverer("https://docs.example.com/");
        let doc = Html::parse_document(
            r##"<a href="#section">s</a>
                <a href="mailto:a@b.c">m</a>
                <a href="">empty</a>
                <a>no href</a>"##,
        );
        let page = Url::parse("https://docs.example.com/guide/").unwrap();
        assert!(links.discover(&doc, &page).is_empty());
    }

    #[test]
    fn test_resolves_against_page_not_root() {
        let links = discoverer("https://docs.example.com/");
        let doc = Html::parse_document(r#"<a href="install">Install</a><a href="../api/">API</a>"#);
        let page = Url::parse("https://docs.example.com/guide/setup/").unwrap();
        assert_eq!(
            strings(&links.discover(&doc, &page)),
            vec![
                "https://docs.example.com/guide/api",
                "https://docs.example.com/guide/setup/install",
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let links = discoverer("https://docs.example.com/");
        let doc = Html::parse_document(
            r#"<a href="/guide/">a</a>
               <a href="/guide">b</a>
               <a href="/guide?ref=nav">c</a>
               <a href="/guide#intro">d</a>"#,
        );
        let page = Url::parse("https://docs.example.com/").unwrap();
        assert_eq!(
            strings(&links.discover(&doc, &page)),
            vec!["https://docs.example.com/guide"]
        );
    }
}
