//! Markdown cleanup.
//!
//! HTML-to-Markdown conversion leaves artifacts behind: escaped punctuation,
//! heading permalink anchors, long runs of blank lines and padded code
//! fences. [`normalize`] repairs them in a fixed order; each pass assumes
//! the previous ones already ran.

use std::sync::LazyLock;

use regex::Regex;

/// Backslash before ASCII punctuation other than a backslash.
static ESCAPED_PUNCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"\\([!"#$%&'()*+,\-./:;<=>?@\[\]^_`{|}~])"##)
        .expect("ESCAPED_PUNCT should compile")
});
/// `[#](#anchor)` permalink in front of a heading.
static HEADING_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[#\]\([^)]*\)\s*(#+.*)").expect("HEADING_ANCHOR should compile")
});
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("BLANK_RUN should compile"));
/// A fence line: indentation, a run of three or more backticks, optional
/// info string without backticks.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(`{3,})[ \t]*([^\s`]*)[^`]*$").expect("FENCE should compile")
});

/// Apply every cleanup pass in order.
pub fn normalize(raw: &str) -> String {
    let text = unescape_dash_and_dot(raw);
    let text = unescape_punctuation(&text);
    let text = strip_heading_anchors(&text);
    let text = collapse_blank_lines(&text);
    tidy_code_fences(&text)
}

/// Prepend the `Source:` header line.
pub fn with_source_header(text: &str, source_url: &str) -> String {
    if source_url.is_empty() {
        return text.to_string();
    }
    format!("Source: {source_url}\n\n{text}")
}

/// Pass 1: `\-` and `\.`.
fn unescape_dash_and_dot(text: &str) -> String {
    text.replace("\\-", "-").replace("\\.", ".")
}

/// Pass 2: remaining escapes of ASCII punctuation.
///
/// Escapes before letters or digits are left alone so that prose such as
/// `C:\new` survives.
fn unescape_punctuation(text: &str) -> String {
    ESCAPED_PUNCT.replace_all(text, "$1").into_owned()
}

/// Pass 3: `[#](#intro) ## Intro` becomes `## Intro`.
fn strip_heading_anchors(text: &str) -> String {
    HEADING_ANCHOR.replace_all(text, "$1").into_owned()
}

/// Pass 4: three or more newlines become one blank line.
fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// Pass 5: no padding just inside code fences.
///
/// After an opening fence, blank lines and the first code line's leading
/// whitespace are dropped and the info string is pulled up against the
/// backticks. Before a closing fence, blank lines are dropped and the fence
/// is unindented. A block only closes on a bare fence at least as long as
/// the one that opened it, so shorter fences inside are plain code. Text
/// after a closing fence is left alone.
fn tidy_code_fences(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    // Length of the fence that opened the current block.
    let mut open_fence: Option<usize> = None;
    let mut after_open = false;

    for line in text.split('\n') {
        if let Some(caps) = FENCE.captures(line) {
            let fence = &caps[1];
            let info = line.trim_start()[fence.len()..].trim();
            match open_fence {
                Some(len) if fence.len() >= len && info.is_empty() => {
                    while out.last().is_some_and(|l| l.trim().is_empty()) {
                        out.pop();
                    }
                    out.push(fence.to_string());
                    open_fence = None;
                    after_open = false;
                    continue;
                }
                Some(_) => {}
                None => {
                    out.push(format!("{fence}{}", &caps[2]));
                    open_fence = Some(fence.len());
                    after_open = true;
                    continue;
                }
            }
        }

        if after_open {
            if line.trim().is_empty() {
                continue;
            }
            out.push(line.trim_start().to_string());
            after_open = false;
            continue;
        }

        out.push(line.to_string());
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescapes_dash_and_dot() {
        assert_eq!(normalize("\\-\\."), "-.");
        assert_eq!(normalize("1\\. First \\- item"), "1. First - item");
    }

    #[test]
    fn test_unescapes_punctuation() {
        assert_eq!(normalize(r"\*bold\* \_x\_ \[a\] \#tag"), "*bold* _x_ [a] #tag");
    }

    #[test]
    fn test_keeps_double_backslash_and_letters() {
        assert_eq!(normalize(r"C:\new \\ path"), r"C:\new \\ path");
    }

    #[test]
    fn test_strips_heading_anchor() {
        assert_eq!(
            normalize("[#](#getting-started) ## Getting started\ntext"),
            "## Getting started\ntext"
        );
        assert_eq!(normalize("[#]() ### Empty"), "### Empty");
    }

    #[test]
    fn test_escaped_heading_anchor_is_repaired_after_unescape() {
        assert_eq!(normalize(r"\[\#\](#setup) ## Setup"), "## Setup");
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_fence_followed_by_blank_line() {
        assert_eq!(
            normalize("```rust\n\nfn main() {}\n\n```"),
            "```rust\nfn main() {}\n```"
        );
    }

    #[test]
    fn test_fence_language_spacing_and_indent() {
        assert_eq!(
            normalize("```  python\n\n    print(1)\n  ```"),
            "```python\nprint(1)\n```"
        );
    }

    #[test]
    fn test_fence_language_with_punctuation() {
        assert_eq!(
            normalize("```shell-session\n\n$ ls\n```"),
            "```shell-session\n$ ls\n```"
        );
    }

    #[test]
    fn test_text_after_closing_fence_untouched() {
        let input = "```\ncode\n```\n\nNext paragraph";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_code_lines_after_first_keep_indent() {
        assert_eq!(
            normalize("```js\nif (x) {\n  y();\n}\n```"),
            "```js\nif (x) {\n  y();\n}\n```"
        );
    }

    #[test]
    fn test_empty_block_leaves_following_text_alone() {
        let input = "```\n```\n\n    indented para\nmore";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_longer_fence_wraps_inner_fence() {
        let input = "````md\n```\n\n  x\n```\n````";
        assert_eq!(normalize(input), input);
        assert_eq!(
            normalize("````md\n\n```rust\nfn f() {}\n```\n\n````\nafter"),
            "````md\n```rust\nfn f() {}\n```\n````\nafter"
        );
    }

    #[test]
    fn test_source_header() {
        assert_eq!(
            with_source_header("# Title", "https://docs.example.com/"),
            "Source: https://docs.example.com/\n\n# Title"
        );
        assert_eq!(with_source_header("# Title", ""), "# Title");
    }
}
