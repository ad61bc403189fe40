//! Node classification.
//!
//! Maps a DOM node to the closed set of kinds the renderers understand.
//! Classification is pure: it looks at the tag name and class list only.

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};
use crate::options::ConvertOptions;

/// Whether list items are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Marker written before every item. Ordered lists always use `1.` and
    /// leave renumbering to the Markdown renderer.
    pub fn marker(self) -> &'static str {
        match self {
            ListKind::Ordered => "1. ",
            ListKind::Unordered => "- ",
        }
    }
}

/// Semantic kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A text run.
    Text,
    /// `h1`..`h6`.
    Heading(u8),
    /// `p`.
    Paragraph,
    /// `ul` or `ol`.
    List(ListKind),
    /// `li`.
    ListItem,
    /// `img`.
    Image,
    /// `a`.
    Link,
    /// A container carrying one of the note class tokens.
    NoteBlock,
    /// Elements whose content is never shown (`script`, `style`, ...).
    Opaque,
    /// Anything else. Contributes nothing itself; its descendants are
    /// still visited.
    Unrecognized,
}

/// Tags that become hint blocks when they carry a note class.
const NOTE_CONTAINERS: &[&str] = &["div", "section", "aside", "blockquote"];

const OPAQUE: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Classify a node.
pub fn classify(dom: &ArenaDom, id: ArenaNodeId, options: &ConvertOptions) -> Kind {
    match dom.get(id).map(|n| &n.data) {
        Some(ArenaNodeData::Text(_)) => Kind::Text,
        Some(ArenaNodeData::Element { name, classes, .. }) => {
            classify_element(name.local.as_ref(), classes, options)
        }
        _ => Kind::Unrecognized,
    }
}

fn classify_element(tag: &str, classes: &[String], options: &ConvertOptions) -> Kind {
    // Note detection wins over generic container handling.
    if NOTE_CONTAINERS.contains(&tag) && classes.iter().any(|c| options.is_note_class(c)) {
        return Kind::NoteBlock;
    }

    if let Some(level) = heading_level(tag) {
        return Kind::Heading(level);
    }

    match tag {
        "p" => Kind::Paragraph,
        "ul" => Kind::List(ListKind::Unordered),
        "ol" => Kind::List(ListKind::Ordered),
        "li" => Kind::ListItem,
        "img" => Kind::Image,
        "a" => Kind::Link,
        _ if OPAQUE.contains(&tag) => Kind::Opaque,
        _ => Kind::Unrecognized,
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    let level = tag.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn classify_first(html: &str, tag: &str) -> Kind {
        let dom = parse_html(html);
        let id = dom.find_by_tag(tag).expect("tag present");
        classify(&dom, id, &ConvertOptions::default())
    }

    #[test]
    fn test_headings() {
        assert_eq!(classify_first("<h1>a</h1>", "h1"), Kind::Heading(1));
        assert_eq!(classify_first("<h6>a</h6>", "h6"), Kind::Heading(6));
        assert_eq!(classify_first("<hr>", "hr"), Kind::Unrecognized);
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("h"), None);
    }

    #[test]
    fn test_block_kinds() {
        assert_eq!(classify_first("<p>x</p>", "p"), Kind::Paragraph);
        assert_eq!(
            classify_first("<ul><li>x</li></ul>", "ul"),
            Kind::List(ListKind::Unordered)
        );
        assert_eq!(
            classify_first("<ol><li>x</li></ol>", "ol"),
            Kind::List(ListKind::Ordered)
        );
        assert_eq!(classify_first("<ol><li>x</li></ol>", "li"), Kind::ListItem);
        assert_eq!(classify_first("<img src=a.png>", "img"), Kind::Image);
        assert_eq!(classify_first("<a href=x>x</a>", "a"), Kind::Link);
        assert_eq!(classify_first("<span>x</span>", "span"), Kind::Unrecognized);
        assert_eq!(classify_first("<script>x()</script>", "script"), Kind::Opaque);
    }

    #[test]
    fn test_note_blocks() {
        assert_eq!(
            classify_first(r#"<div class="note">x</div>"#, "div"),
            Kind::NoteBlock
        );
        assert_eq!(
            classify_first(r#"<div class="box callout wide">x</div>"#, "div"),
            Kind::NoteBlock
        );
        // Class tokens must match exactly.
        assert_eq!(
            classify_first(r#"<div class="footnote">x</div>"#, "div"),
            Kind::Unrecognized
        );
        // Only container tags become notes.
        assert_eq!(
            classify_first(r#"<p class="note">x</p>"#, "p"),
            Kind::Paragraph
        );
    }

    #[test]
    fn test_custom_note_classes() {
        let dom = parse_html(r#"<div class="note">a</div><aside class="tip">b</aside>"#);
        let options = ConvertOptions::new().with_note_classes(["tip"]);

        let div = dom.find_by_tag("div").unwrap();
        let aside = dom.find_by_tag("aside").unwrap();
        assert_eq!(classify(&dom, div, &options), Kind::Unrecognized);
        assert_eq!(classify(&dom, aside, &options), Kind::NoteBlock);
    }

    #[test]
    fn test_non_elements() {
        let dom = parse_html("<!-- c --><p>text</p>");
        let options = ConvertOptions::default();
        assert_eq!(classify(&dom, dom.document(), &options), Kind::Unrecognized);

        let p = dom.find_by_tag("p").unwrap();
        let text = dom.children(p).next().unwrap();
        assert_eq!(classify(&dom, text, &options), Kind::Text);
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(ListKind::Ordered.marker(), "1. ");
        assert_eq!(ListKind::Unordered.marker(), "- ");
    }
}
