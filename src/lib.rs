//! # hintdown
//!
//! Converts exported help-center HTML pages into GitBook-flavoured Markdown.
//!
//! ## Features
//!
//! - Headings, paragraphs, lists, links and images in document order
//! - Note/callout containers become `{% hint %}` blocks
//! - Images are copied into a flat `media/` folder and relinked
//! - A `SUMMARY.md` table of contents from the index page's links
//! - Every node is rendered at most once, so nested content never repeats
//!
//! ## Quick Start
//!
//! ```
//! use std::path::Path;
//! use hintdown::{ConvertOptions, convert_html};
//!
//! let doc = convert_html(
//!     "<h3>Setup</h3><ul><li>Install</li><li>Run</li></ul>",
//!     Path::new("."),
//!     &ConvertOptions::default(),
//! )?;
//! assert_eq!(doc.markdown, "### Setup\n\n- Install\n- Run");
//! # Ok::<(), hintdown::Error>(())
//! ```
//!
//! ## Batches
//!
//! [`Batch`] converts many pages with one shared media folder ledger and
//! builds the table of contents. A page that fails to convert does not stop
//! the others; see [`BatchResult::failures`].
//!
//! ```no_run
//! use std::path::Path;
//! use hintdown::{ConvertOptions, SourceDocument, batch};
//!
//! let html = std::fs::read("export/index.html")?;
//! let pages = vec![SourceDocument::new(
//!     "index.html",
//!     hintdown::dom::parse_html_bytes(&html),
//!     "export",
//! )];
//!
//! let options = ConvertOptions::default();
//! let result = batch::convert(&pages, &options);
//! result.write_to(Path::new("out"), &options)?;
//! # Ok::<(), hintdown::Error>(())
//! ```

pub mod assets;
pub mod batch;
pub mod convert;
pub mod dom;
pub mod error;
pub mod options;
pub mod summary;
pub(crate) mod util;

pub use assets::{AssetFs, AssetRef, StdFs};
pub use batch::{Batch, BatchResult, DocumentFailure, SourceDocument};
pub use convert::{ConvertedDocument, convert_document, convert_html};
pub use error::{Error, Result};
pub use options::ConvertOptions;
