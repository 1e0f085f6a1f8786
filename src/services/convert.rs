//! HTML to Markdown conversion.

use htmd::HtmlToMarkdown;
use htmd::options::{CodeBlockStyle, HeadingStyle, Options};

use crate::error::{AppError, Result};

/// Turns a cleaned content region into Markdown-like text.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, html: &str) -> Result<String>;
}

/// Converter backed by `htmd`.
#[derive(Debug, Clone)]
pub struct HtmdConverter {
    skip_tags: Vec<&'static str>,
}

impl HtmdConverter {
    pub fn new() -> Self {
        Self {
            skip_tags: vec!["script", "style", "noscript"],
        }
    }
}

impl Default for HtmdConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for HtmdConverter {
    fn convert(&self, html: &str) -> Result<String> {
        HtmlToMarkdown::builder()
            .skip_tags(self.skip_tags.clone())
            .options(Options {
                heading_style: HeadingStyle::Atx,
                code_block_style: CodeBlockStyle::Fenced,
                ..Default::default()
            })
            .build()
            .convert(html)
            .map_err(AppError::conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_heading_and_paragraph() {
        let md = HtmdConverter::new()
            .convert("<h1>Install</h1><p>Run the installer.</p>")
            .unwrap();
        assert!(md.contains("Install"));
        assert!(md.contains("Run the installer."));
    }

    #[test]
    fn test_skips_scripts() {
        let md = HtmdConverter::new()
            .convert("<p>Keep</p><script>drop()</script>")
            .unwrap();
        assert!(md.contains("Keep"));
        assert!(!md.contains("drop()"));
    }

    #[test]
    fn test_code_block_is_fenced() {
        let md = HtmdConverter::new()
            .convert("<pre><code class=\"language-rust\">\nfn main() {}\n</code></pre>")
            .unwrap();
        assert!(md.contains("```"));
        assert!(md.contains("fn main() {}"));
    }
}
