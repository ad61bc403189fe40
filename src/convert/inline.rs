//! Inline content of paragraphs, list items and links.

use crate::assets::AssetFs;
use crate::dom::ArenaNodeId;
use crate::error::Result;

use super::classify::{Kind, classify};
use super::context::RenderContext;
use super::{DEFAULT_HREF, UNTITLED};

/// Trim a text run and collapse internal whitespace to single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl<F: AssetFs> RenderContext<'_, F> {
    /// Render the mixed content of a paragraph or list item as one line.
    ///
    /// Text runs, links, images and inline wrappers are consumed. Nested
    /// lists, headings and notes are left for their own renderers.
    pub(super) fn render_inline(&mut self, id: ArenaNodeId) -> Result<String> {
        let mut pieces = Vec::new();
        self.collect_inline(id, &mut pieces)?;
        Ok(pieces.join(" ").trim().to_string())
    }

    fn collect_inline(&mut self, parent: ArenaNodeId, pieces: &mut Vec<String>) -> Result<()> {
        let dom = self.dom;

        for child in dom.children(parent) {
            if self.visited.contains(child) {
                continue;
            }

            let piece = match classify(dom, child, self.options) {
                Kind::List(_) | Kind::Heading(_) | Kind::NoteBlock => continue,
                Kind::Opaque => {
                    self.visited.insert_subtree(dom, child);
                    continue;
                }
                Kind::Paragraph | Kind::ListItem | Kind::Unrecognized => {
                    self.visited.insert(child);
                    self.collect_inline(child, pieces)?;
                    continue;
                }
                Kind::Text => {
                    self.visited.insert(child);
                    dom.text_content(child)
                        .map(collapse_whitespace)
                        .unwrap_or_default()
                }
                Kind::Link => {
                    self.visited.insert(child);
                    self.render_link(child)?
                }
                Kind::Image => {
                    self.visited.insert(child);
                    self.render_image(child)?
                }
            };

            if !piece.is_empty() {
                pieces.push(piece);
            }
        }

        Ok(())
    }

    /// Render a hyperlink as `[text](href)` and consume its inline content.
    ///
    /// Block content wrapped in the anchor (a heading or note inside a "card"
    /// link) stays unvisited and is rendered after the link by whoever walks
    /// the anchor's parent. An anchor with neither `href` nor inline content
    /// (a bare `<a name=...>` target) renders nothing.
    pub(super) fn render_link(&mut self, id: ArenaNodeId) -> Result<String> {
        let href = self
            .dom
            .get_attr(id, "href")
            .map(str::trim)
            .filter(|h| !h.is_empty());

        let mut pieces = Vec::new();
        self.collect_inline(id, &mut pieces)?;
        let text = pieces.join(" ");

        if href.is_none() && text.is_empty() {
            return Ok(String::new());
        }

        let text = if text.is_empty() { UNTITLED } else { text.as_str() };
        Ok(format!("[{text}]({})", href.unwrap_or(DEFAULT_HREF)))
    }
}
