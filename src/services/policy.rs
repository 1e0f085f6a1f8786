//! Site generator policies.
//!
//! Each static site generator puts the article in a different place. A
//! policy names the candidate content regions, in priority order, and the
//! boilerplate to strip from whichever region wins.

use crate::models::SiteKind;

/// Generator-specific rules for locating page content.
pub trait SitePolicy: Send + Sync {
    /// Tag recorded as metadata, e.g. `"astro"`.
    fn site_tag(&self) -> &'static str;

    /// CSS selectors for the content region; the first match wins.
    fn content_selectors(&self) -> &'static [&'static str];

    /// CSS selectors for elements removed from the content region.
    fn boilerplate_selectors(&self) -> &'static [&'static str];
}

/// Astro (Starlight and similar themes).
#[derive(Debug, Clone, Copy, Default)]
pub struct AstroPolicy;

impl SitePolicy for AstroPolicy {
    fn site_tag(&self) -> &'static str {
        "astro"
    }

    fn content_selectors(&self) -> &'static [&'static str] {
        &[
            "article.content",
            "main.main-content",
            "div.prose",
            r#"div[role="main"]"#,
            "main",
        ]
    }

    fn boilerplate_selectors(&self) -> &'static [&'static str] {
        &[
            "script",
            "style",
            ".toc",
            ".pagination",
            ".footer-nav",
            ".edit-on-github",
            r#"[aria-label="Table of Contents"]"#,
        ]
    }
}

/// VuePress, both the v2 default theme and the older v1 layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct VuePressPolicy;

impl SitePolicy for VuePressPolicy {
    fn site_tag(&self) -> &'static str {
        "vuepress"
    }

    fn content_selectors(&self) -> &'static [&'static str] {
        &[
            "div.theme-default-content", // v2
            "div.content",               // v1
            "main.page",
            "article",
        ]
    }

    fn boilerplate_selectors(&self) -> &'static [&'static str] {
        &["script", ".page-nav", ".page-edit"]
    }
}

/// Policy for an explicitly chosen generator.
///
/// Returns `None` for [`SiteKind::Auto`], which has to be resolved against
/// a fetched page first.
pub fn policy_for(kind: SiteKind) -> Option<Box<dyn SitePolicy>> {
    match kind {
        SiteKind::Astro => Some(Box::new(AstroPolicy)),
        SiteKind::VuePress => Some(Box::new(VuePressPolicy)),
        SiteKind::Auto => None,
    }
}
