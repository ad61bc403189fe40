//! Document walk and fragment assembly.
//!
//! [`RenderContext`] owns everything one page conversion needs: the tree,
//! the visited set and the assets collected so far. The walk visits the
//! body's descendants in document order and hands every node that has not
//! been consumed yet to the renderer for its [`Kind`]. Renderers that
//! consume descendants (paragraphs, lists, headings, links, notes) mark them
//! in the same visited set, so no node is ever rendered twice.

use std::path::{Path, PathBuf};

use crate::assets::{AssetFs, AssetRef, AssetRelocator};
use crate::dom::{self, ArenaDom, ArenaNodeId};
use crate::error::Result;
use crate::options::ConvertOptions;

use super::ConvertedDocument;
use super::UNTITLED;
use super::classify::{Kind, classify};
use super::inline::collapse_whitespace;

/// Nodes already rendered or consumed, indexed by arena position.
#[derive(Debug, Clone)]
pub(crate) struct Visited {
    seen: Vec<bool>,
}

impl Visited {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            seen: vec![false; len],
        }
    }

    pub(crate) fn contains(&self, id: ArenaNodeId) -> bool {
        self.seen.get(id.index()).copied().unwrap_or(false)
    }

    /// Mark a node. Returns `false` if it was already marked.
    pub(crate) fn insert(&mut self, id: ArenaNodeId) -> bool {
        match self.seen.get_mut(id.index()) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    /// Mark a node and everything below it.
    pub(crate) fn insert_subtree(&mut self, dom: &ArenaDom, id: ArenaNodeId) {
        self.insert(id);
        for descendant in dom.descendants(id) {
            self.insert(descendant);
        }
    }
}

/// State for converting one page.
pub(crate) struct RenderContext<'a, F: AssetFs> {
    pub(super) dom: &'a ArenaDom,
    pub(super) options: &'a ConvertOptions,
    pub(super) base_dir: &'a Path,
    pub(super) media_root: PathBuf,
    pub(super) relocator: &'a mut AssetRelocator<F>,
    pub(super) visited: Visited,
    pub(super) assets: Vec<AssetRef>,
}

impl<'a, F: AssetFs> RenderContext<'a, F> {
    pub(crate) fn new(
        dom: &'a ArenaDom,
        base_dir: &'a Path,
        options: &'a ConvertOptions,
        relocator: &'a mut AssetRelocator<F>,
    ) -> Self {
        Self {
            dom,
            options,
            base_dir,
            media_root: options.media_root_for(base_dir),
            relocator,
            visited: Visited::new(dom.len()),
            assets: Vec::new(),
        }
    }

    /// Render the page, consuming the context.
    pub(crate) fn render(mut self) -> Result<ConvertedDocument> {
        let title = dom::document_title(self.dom);

        let fragments = match self.dom.body() {
            Some(body) => self.walk(body)?,
            None => Vec::new(),
        };

        let mut markdown = String::new();
        if !fragments.is_empty() {
            if self.options.title_heading
                && let Some(title) = &title
            {
                markdown.push_str("# ");
                markdown.push_str(title);
                markdown.push_str("\n\n");
            }
            let body: Vec<&str> = fragments.iter().map(|f| f.trim()).collect();
            markdown.push_str(&body.join("\n\n"));
        }

        Ok(ConvertedDocument {
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            markdown,
            assets: self.assets,
        })
    }

    /// Visit every node below `root` in document order and return the
    /// non-blank fragments, untrimmed.
    pub(super) fn walk(&mut self, root: ArenaNodeId) -> Result<Vec<String>> {
        let dom = self.dom;
        let mut fragments = Vec::new();

        for id in dom.descendants(root) {
            if !self.visited.insert(id) {
                continue;
            }
            let fragment = self.dispatch(id)?;
            if !fragment.trim().is_empty() {
                fragments.push(fragment);
            }
        }

        Ok(fragments)
    }

    /// Render a single node according to its kind.
    pub(super) fn dispatch(&mut self, id: ArenaNodeId) -> Result<String> {
        match classify(self.dom, id, self.options) {
            Kind::Text => Ok(self
                .dom
                .text_content(id)
                .map(collapse_whitespace)
                .unwrap_or_default()),
            Kind::Heading(level) => Ok(self.render_heading(id, level)),
            Kind::Paragraph => self.render_inline(id),
            Kind::ListItem => {
                // An item outside any list still reads as a bullet.
                let text = self.render_inline(id)?;
                Ok(if text.is_empty() {
                    text
                } else {
                    format!("- {text}")
                })
            }
            Kind::List(kind) => self.render_list(id, kind),
            Kind::Image => self.render_image(id),
            Kind::Link => self.render_link(id),
            Kind::NoteBlock => self.render_note(id),
            Kind::Opaque => {
                self.visited.insert_subtree(self.dom, id);
                Ok(String::new())
            }
            Kind::Unrecognized => Ok(String::new()),
        }
    }

    /// Remember an asset for the page result, once.
    pub(super) fn record_asset(&mut self, asset: AssetRef) {
        if !self.assets.contains(&asset) {
            self.assets.push(asset);
        }
    }
}
