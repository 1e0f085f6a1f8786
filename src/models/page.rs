// src/models/page.rs

//! Per-page records and the crawl report.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use super::Identifier;

/// Raw markup returned by a fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Identifier that was scheduled
    pub identifier: Identifier,

    /// Final URL after redirects, used as the base for relative links
    pub url: Url,

    /// Decoded response body
    pub body: String,
}

impl FetchedPage {
    pub fn new(identifier: Identifier, url: Url, body: impl Into<String>) -> Self {
        Self {
            identifier,
            url,
            body: body.into(),
        }
    }
}

/// A page ready to be persisted.
#[derive(Debug, Clone)]
pub struct PageDocument {
    pub identifier: Identifier,
    pub title: String,
    pub site_tag: &'static str,
    /// Normalized Markdown, including the `Source:` header when enabled
    pub markdown: String,
}

/// A document written to the output store.
#[derive(Debug, Clone, Serialize)]
pub struct SavedDocument {
    pub url: Identifier,
    pub title: String,
    pub file_name: String,
    pub site_tag: String,
}

/// Where in the per-page pipeline a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Fetch,
    Extract,
    Convert,
    Persist,
}

/// A recoverable per-page failure.
#[derive(Debug, Clone, Serialize)]
pub struct PageFailure {
    pub url: Identifier,
    pub stage: FailureStage,
    pub message: String,
}

/// Outcome of a whole crawl.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub root: Identifier,
    pub site_tag: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Every identifier whose fetch succeeded
    pub visited: BTreeSet<Identifier>,
    pub saved: Vec<SavedDocument>,
    /// Pages that could not be fetched; these do not fail the crawl
    pub fetch_failures: Vec<PageFailure>,
    /// Pages fetched but not saved; any entry here fails the crawl
    pub page_failures: Vec<PageFailure>,
    pub success: bool,
}

impl CrawlReport {
    pub fn new(root: Identifier, site_tag: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            root,
            site_tag: site_tag.into(),
            started_at: now,
            finished_at: now,
            visited: BTreeSet::new(),
            saved: Vec::new(),
            fetch_failures: Vec::new(),
            page_failures: Vec::new(),
            success: true,
        }
    }

    pub fn record_failure(&mut self, failure: PageFailure) {
        if failure.stage == FailureStage::Fetch {
            self.fetch_failures.push(failure);
        } else {
            self.success = false;
            self.page_failures.push(failure);
        }
    }

    /// Stamp the end time and settle the success flag.
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
        self.success = self.page_failures.is_empty();
    }

    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(stage: FailureStage) -> PageFailure {
        PageFailure {
            url: Identifier::parse("https://docs.example.com/a").unwrap(),
            stage,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn fetch_failures_do_not_fail_the_crawl() {
        let root = Identifier::parse("https://docs.example.com/").unwrap();
        let mut report = CrawlReport::new(root, "astro");
        report.record_failure(failure(FailureStage::Fetch));
        report.finish();
        assert!(report.success);
        assert_eq!(report.fetch_failures.len(), 1);
    }

    #[test]
    fn page_failures_fail_the_crawl() {
        let root = Identifier::parse("https://docs.example.com/").unwrap();
        let mut report = CrawlReport::new(root, "astro");
        report.record_failure(failure(FailureStage::Extract));
        report.finish();
        assert!(!report.success);
        assert_eq!(report.page_failures.len(), 1);
    }

    #[test]
    fn report_serializes_identifiers_as_strings() {
        let root = Identifier::parse("https://docs.example.com/").unwrap();
        let mut report = CrawlReport::new(root.clone(), "vuepress");
        report.visited.insert(root);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["root"], "https://docs.example.com/");
        assert_eq!(json["visited"][0], "https://docs.example.com/");
        assert_eq!(json["site_tag"], "vuepress");
    }
}
