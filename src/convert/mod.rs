//! HTML page → Markdown conversion.
//!
//! The converter walks a parsed page in document order and renders each node
//! exactly once:
//!
//! - [`classify`]: tag and class → [`Kind`]
//! - `inline`: one-line rendering of paragraphs and list items, with links
//!   and images resolved in place
//! - `block`: headings, lists (ordered lists always use `1.`) and images,
//!   including relocation of image files into the media folder
//! - `note`: note/callout containers as `{% hint %}` blocks
//! - `context`: the walk itself and the visited set shared by all of the
//!   above
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use hintdown::{ConvertOptions, convert_html};
//!
//! let html = r#"<html><head><title>FAQ</title></head><body>
//!     <h2>Accounts</h2>
//!     <div class="note"><p>Careful!</p></div>
//! </body></html>"#;
//!
//! let doc = convert_html(html, Path::new("."), &ConvertOptions::default())?;
//! assert_eq!(
//!     doc.markdown,
//!     "# FAQ\n\n## Accounts\n\n{% hint style=\"info\" %}\nCareful!\n{% endhint %}"
//! );
//! # Ok::<(), hintdown::Error>(())
//! ```

mod block;
mod classify;
mod context;
mod inline;
mod note;

use std::path::Path;

pub use classify::{Kind, ListKind, classify};

use crate::assets::{AssetFs, AssetRef, AssetRelocator, StdFs};
use crate::dom::{self, ArenaDom};
use crate::error::Result;
use crate::options::ConvertOptions;
use context::RenderContext;

/// Title used when a page has none, and link text for empty links.
pub const UNTITLED: &str = "Untitled";
/// Link target for anchors without `href`.
pub const DEFAULT_HREF: &str = "#";
/// Alt text for images without one.
pub const DEFAULT_ALT: &str = "Image";
/// Reference written for images whose file does not exist.
pub const MISSING_IMAGE: &str = "image-not-found";

/// Result of converting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    /// Text of the page's `<title>`, or [`UNTITLED`].
    pub title: String,
    /// The rendered Markdown. Empty when the body produced nothing.
    pub markdown: String,
    /// Images found on disk and copied, in order of first reference.
    pub assets: Vec<AssetRef>,
}

impl ConvertedDocument {
    /// Whether the page produced no Markdown at all.
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty()
    }
}

/// Convert a parsed page, copying its images with `std::fs`.
///
/// `base_dir` is the directory relative image paths are resolved against.
pub fn convert_document(
    dom: &ArenaDom,
    base_dir: &Path,
    options: &ConvertOptions,
) -> Result<ConvertedDocument> {
    let mut relocator = AssetRelocator::new(StdFs);
    convert_document_with(dom, base_dir, options, &mut relocator)
}

/// Convert a parsed page, relocating images through `relocator`.
///
/// Sharing one relocator across pages lets it notice file name collisions
/// and skip repeated copies of the same image.
pub fn convert_document_with<F: AssetFs>(
    dom: &ArenaDom,
    base_dir: &Path,
    options: &ConvertOptions,
    relocator: &mut AssetRelocator<F>,
) -> Result<ConvertedDocument> {
    RenderContext::new(dom, base_dir, options, relocator).render()
}

/// Parse and convert an HTML string.
pub fn convert_html(
    html: &str,
    base_dir: &Path,
    options: &ConvertOptions,
) -> Result<ConvertedDocument> {
    convert_document(&dom::parse_html(html), base_dir, options)
}
