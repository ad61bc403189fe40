//! Table of contents from an index page.
//!
//! The index page's links, in document order, become a GitBook
//! `SUMMARY.md`: one bullet per link, with links to converted pages
//! pointing at their Markdown output.

use crate::assets::is_remote;
use crate::convert::UNTITLED;
use crate::dom::ArenaDom;
use crate::options::ConvertOptions;

/// Extensions of pages that get converted, and so get relinked.
const PAGE_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Build the table of contents, or `None` when the page has no usable links.
///
/// ```
/// use hintdown::{ConvertOptions, dom, summary};
///
/// let index = dom::parse_html(
///     r#"<ul><li><a href="intro.html">Intro</a></li><li><a href="setup.html">Setup</a></li></ul>"#,
/// );
/// assert_eq!(
///     summary::build_summary(&index, &ConvertOptions::default()).as_deref(),
///     Some("# Summary\n\n- [Intro](intro.md)\n- [Setup](setup.md)")
/// );
/// ```
pub fn build_summary(index: &ArenaDom, options: &ConvertOptions) -> Option<String> {
    let root = index.body().unwrap_or(index.document());

    let entries: Vec<String> = index
        .descendants(root)
        .filter(|&id| index.is_tag(id, "a"))
        .filter_map(|id| {
            let href = index.get_attr(id, "href")?.trim();
            if href.is_empty() || href.starts_with('#') {
                return None;
            }
            let text = index.collect_text(id);
            let text = if text.is_empty() { UNTITLED } else { text.as_str() };
            Some(format!(
                "- [{text}]({})",
                rewrite_href(href, &options.target_extension)
            ))
        })
        .collect();

    if entries.is_empty() {
        return None;
    }
    Some(format!("# Summary\n\n{}", entries.join("\n")))
}

/// Point a link at a page's converted output: `a/b.html#x` → `a/b.md#x`.
///
/// URLs and links to anything that is not an HTML page are returned as-is.
pub fn rewrite_href(href: &str, target_extension: &str) -> String {
    if is_remote(href) {
        return href.to_string();
    }

    let split = href.find(['?', '#']).unwrap_or(href.len());
    let (path, suffix) = href.split_at(split);

    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let Some(dot) = path[file_start..].rfind('.').map(|i| file_start + i) else {
        return href.to_string();
    };

    let extension = &path[dot + 1..];
    if !PAGE_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(extension))
    {
        return href.to_string();
    }

    format!("{}.{target_extension}{suffix}", &path[..dot])
}
