//! Site generator detection.
//!
//! Looks at a fetched page and guesses which static site generator built
//! it, so that `generator = "auto"` can pick a policy.

use scraper::{Html, Selector};

use crate::models::SiteKind;

/// Markup markers checked when the generator meta tag is missing.
const MARKERS: &[(SiteKind, &str)] = &[
    (SiteKind::VuePress, "div.theme-default-content"),
    (SiteKind::VuePress, "div.theme-container"),
    (SiteKind::Astro, "astro-island"),
    (SiteKind::Astro, "starlight-theme-select"),
];

/// Detects the generator of a page.
pub struct GeneratorDetector {
    meta: Selector,
    markers: Vec<(SiteKind, Selector)>,
}

impl GeneratorDetector {
    pub fn new() -> Self {
        let meta = Selector::parse(r#"meta[name="generator"]"#).expect("valid meta selector");
        let markers = MARKERS
            .iter()
            .filter_map(|(kind, s)| Selector::parse(s).ok().map(|sel| (*kind, sel)))
            .collect();
        Self { meta, markers }
    }

    /// Detected generator, or `None` when nothing matched.
    pub fn detect(&self, document: &Html) -> Option<SiteKind> {
        self.from_meta(document).or_else(|| self.from_markers(document))
    }

    fn from_meta(&self, document: &Html) -> Option<SiteKind> {
        document
            .select(&self.meta)
            .filter_map(|m| m.value().attr("content"))
            .find_map(|content| {
                let content = content.to_lowercase();
                if content.contains("vuepress") {
                    Some(SiteKind::VuePress)
                } else if content.contains("astro") {
                    Some(SiteKind::Astro)
                } else {
                    None
                }
            })
    }

    fn from_markers(&self, document: &Html) -> Option<SiteKind> {
        let html = document.html();
        if html.contains("data-astro-cid") {
            return Some(SiteKind::Astro);
        }
        self.markers
            .iter()
            .find(|(_, sel)| document.select(sel).next().is_some())
            .map(|(kind, _)| *kind)
    }
}

impl Default for GeneratorDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(html: &str) -> Option<SiteKind> {
        GeneratorDetector::new().detect(&Html::parse_document(html))
    }

    #[test]
    fn test_meta_generator() {
        assert_eq!(
            detect(r#"<head><meta name="generator" content="Astro v4.16.7"></head>"#),
            Some(SiteKind::Astro)
        );
        assert_eq!(
            detect(r#"<head><meta name="generator" content="VuePress 2.0.0-rc.0"></head>"#),
            Some(SiteKind::VuePress)
        );
    }

    #[test]
    fn test_markup_markers() {
        assert_eq!(
            detect(r#"<div class="theme-container"><main class="page"></main></div>"#),
            Some(SiteKind::VuePress)
        );
        assert_eq!(
            detect(r#"<main data-astro-cid-xyz><p>x</p></main>"#),
            Some(SiteKind::Astro)
        );
    }

    #[test]
    fn test_unknown_generator() {
        assert_eq!(
            detect(r#"<head><meta name="generator" content="Hugo 0.120"></head><main></main>"#),
            None
        );
    }
}
