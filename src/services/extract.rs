//! Content region extraction.
//!
//! Selects the article region of a page according to a [`SitePolicy`] and
//! writes it back out as HTML with boilerplate removed, in-page anchor
//! destinations dropped and code block text re-padded, ready for Markdown
//! conversion. The parsed document is never mutated; the cleanup is applied
//! while the region is serialized.

use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::services::policy::SitePolicy;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Cleaned HTML of a page's content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegion {
    /// Selector that matched
    pub selector: &'static str,
    pub html: String,
}

/// Extracts content regions for one site policy.
pub struct ContentExtractor {
    site_tag: &'static str,
    content: Vec<(&'static str, Selector)>,
    boilerplate: Vec<Selector>,
    title: Selector,
}

impl ContentExtractor {
    /// Compile the selectors of a policy.
    pub fn new(policy: &dyn SitePolicy) -> Result<Self> {
        let content = policy
            .content_selectors()
            .iter()
            .map(|s| parse_selector(s).map(|sel| (*s, sel)))
            .collect::<Result<Vec<_>>>()?;
        let boilerplate = policy
            .boilerplate_selectors()
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            site_tag: policy.site_tag(),
            content,
            boilerplate,
            title: parse_selector("title")?,
        })
    }

    pub fn site_tag(&self) -> &'static str {
        self.site_tag
    }

    /// First element matching the policy's content selectors, in order.
    pub fn select_region<'a>(&self, document: &'a Html) -> Option<(&'static str, ElementRef<'a>)> {
        self.content
            .iter()
            .find_map(|(name, sel)| document.select(sel).next().map(|el| (*name, el)))
    }

    /// Select and clean the content region; `None` when no selector matches.
    pub fn extract(&self, document: &Html) -> Option<ContentRegion> {
        let (selector, region) = self.select_region(document)?;
        let mut html = String::new();
        self.write_element(region, true, &mut html);
        Some(ContentRegion { selector, html })
    }

    /// Like [`extract`](Self::extract) but reports a missing region as an error.
    pub fn extract_or_err(&self, document: &Html, url: &str) -> Result<ContentRegion> {
        self.extract(document).ok_or_else(|| {
            AppError::extraction(
                url,
                format!("no {} content region matched", self.site_tag),
            )
        })
    }

    /// Page `<title>`, trimmed.
    pub fn title(&self, document: &Html) -> Option<String> {
        document
            .select(&self.title)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn is_boilerplate(&self, element: &ElementRef<'_>) -> bool {
        self.boilerplate.iter().any(|sel| sel.matches(element))
    }

    fn write_element(&self, element: ElementRef<'_>, is_root: bool, out: &mut String) {
        if !is_root && self.is_boilerplate(&element) {
            return;
        }

        let value = element.value();
        write_open_tag(value, out);
        if VOID_ELEMENTS.contains(&value.name()) {
            return;
        }

        if value.name() == "pre" {
            if let Some(code) = sole_text(element).filter(|t| !t.is_empty()) {
                let padded = format!("\n{}\n", code.trim());
                write_code_body(element, &padded, out);
                write_close_tag(value, out);
                return;
            }
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => escape_text(text, out),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.write_element(child, false, out);
                    }
                }
                _ => {}
            }
        }

        write_close_tag(value, out);
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Text of an element whose children form a single chain ending in text,
/// e.g. `<pre><code>text</code></pre>`.
fn sole_text(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(text) => Some(text.to_string()),
        Node::Element(_) => ElementRef::wrap(only).and_then(sole_text),
        _ => None,
    }
}

/// Write the body of a `pre` block, keeping wrapper elements such as
/// `<code class="language-rust">` and replacing the text at the bottom.
fn write_code_body(element: ElementRef<'_>, text: &str, out: &mut String) {
    match element.children().next().and_then(ElementRef::wrap) {
        Some(inner) => {
            write_open_tag(inner.value(), out);
            write_code_body(inner, text, out);
            write_close_tag(inner.value(), out);
        }
        None => escape_text(text, out),
    }
}

fn write_open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attrs() {
        // In-page anchors mean nothing outside the source page
        if name == "href" && element.name() == "a" && value.starts_with('#') {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');
}

fn write_close_tag(element: &Element, out: &mut String) {
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
