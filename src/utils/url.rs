// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Characters that are not allowed in output file names.
const ILLEGAL_FILE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Resolve a link destination against the URL of the page it appears on.
///
/// Returns `None` for destinations that cannot be resolved or that point
/// at something other than an http(s) document (`mailto:`, `javascript:`).
///
/// # Examples
/// ```
/// use doccrawl::utils::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://docs.example.com/guide/").unwrap();
/// assert_eq!(
///     resolve_link(&base, "intro").unwrap().as_str(),
///     "https://docs.example.com/guide/intro"
/// );
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let resolved = base.join(href.trim()).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

/// Derive a file system safe stem from a URL path.
///
/// Leading and trailing slashes are dropped, illegal characters become `_`
/// and an empty path becomes `index`.
///
/// # Examples
/// ```
/// use doccrawl::utils::url::file_stem;
///
/// assert_eq!(file_stem("/guide/intro/"), "guide_intro");
/// assert_eq!(file_stem("/"), "index");
/// ```
pub fn file_stem(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return "index".to_string();
    }

    trimmed
        .chars()
        .map(|c| if ILLEGAL_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}
