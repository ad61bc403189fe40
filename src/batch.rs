//! Batch conversion of a set of pages.
//!
//! Pages are converted one after the other. A page that fails (an image
//! could not be copied) is reported and skipped; the rest of the batch
//! carries on. Pages that render to nothing are omitted from the output.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::{AssetFs, AssetRef, AssetRelocator, StdFs};
use crate::convert::convert_document_with;
use crate::dom::{self, ArenaDom};
use crate::error::{Error, Result};
use crate::options::ConvertOptions;
use crate::summary::build_summary;

/// One input page.
#[derive(Debug)]
pub struct SourceDocument {
    /// Input file name, e.g. `setup.html`. The output name is derived from it.
    pub name: String,
    /// The parsed page.
    pub dom: ArenaDom,
    /// Directory relative image paths are resolved against.
    pub base_dir: PathBuf,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, dom: ArenaDom, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dom,
            base_dir: base_dir.into(),
        }
    }

    /// Parse `html` into a new source document.
    pub fn from_html(name: impl Into<String>, html: &str, base_dir: impl Into<PathBuf>) -> Self {
        Self::new(name, dom::parse_html(html), base_dir)
    }

    /// Whether this is the page named `index` (by full name or file name).
    fn is_named(&self, index: &str) -> bool {
        self.name == index
            || Path::new(&self.name)
                .file_name()
                .is_some_and(|n| n == index)
    }
}

/// A page that could not be converted.
#[derive(Debug)]
pub struct DocumentFailure {
    pub name: String,
    pub error: Error,
}

/// Everything a batch produced.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Output file name → Markdown text, for every non-empty page.
    pub documents: BTreeMap<String, String>,
    /// Every image copied, once each, in order of first reference.
    pub assets: Vec<AssetRef>,
    /// The table of contents built from the index page, if any.
    pub toc: Option<String>,
    /// Name of the page the table of contents was built from.
    pub toc_source: Option<String>,
    /// Pages that rendered to nothing.
    pub omitted: Vec<String>,
    /// Pages that failed to convert.
    pub failures: Vec<DocumentFailure>,
}

impl BatchResult {
    /// Whether every page converted (omitted pages are not failures).
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Where the table of contents goes, relative to the output directory:
    /// next to the index page's own output.
    pub fn toc_path(&self, options: &ConvertOptions) -> Option<PathBuf> {
        self.toc.as_ref()?;
        let parent = self
            .toc_source
            .as_deref()
            .and_then(|name| Path::new(name).parent())
            .unwrap_or(Path::new(""));
        Some(parent.join(&options.toc_file))
    }

    /// Write every document and the table of contents below `dir`.
    ///
    /// Returns the paths written.
    pub fn write_to(&self, dir: &Path, options: &ConvertOptions) -> Result<Vec<PathBuf>> {
        let toc = self.toc_path(options).zip(self.toc.as_ref());

        let mut written = Vec::new();
        let documents = self.documents.iter().map(|(n, t)| (PathBuf::from(n), t));
        for (name, text) in documents.chain(toc) {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, text)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Batch converter.
///
/// ```
/// use hintdown::{Batch, ConvertOptions, SourceDocument};
///
/// let options = ConvertOptions::default();
/// let pages = vec![
///     SourceDocument::from_html("index.html", r#"<a href="a.html">A</a>"#, "."),
///     SourceDocument::from_html("a.html", "<p>Hello</p>", "."),
///     SourceDocument::from_html("blank.html", "<body></body>", "."),
/// ];
///
/// let result = Batch::new(&options).run(&pages);
/// assert_eq!(result.documents["a.md"], "Hello");
/// assert_eq!(result.omitted, ["blank.html"]);
/// assert_eq!(result.toc.as_deref(), Some("# Summary\n\n- [A](a.md)"));
/// ```
pub struct Batch<'a, F: AssetFs = StdFs> {
    options: &'a ConvertOptions,
    relocator: AssetRelocator<F>,
}

impl<'a> Batch<'a, StdFs> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self::with_fs(options, StdFs)
    }
}

impl<'a, F: AssetFs> Batch<'a, F> {
    /// Use `fs` for every asset operation.
    pub fn with_fs(options: &'a ConvertOptions, fs: F) -> Self {
        Self {
            options,
            relocator: AssetRelocator::new(fs),
        }
    }

    /// Convert every page, then build the table of contents.
    pub fn run(mut self, documents: &[SourceDocument]) -> BatchResult {
        let mut result = BatchResult::default();
        let mut seen_assets = HashSet::new();

        for doc in documents {
            let converted = match convert_document_with(
                &doc.dom,
                &doc.base_dir,
                self.options,
                &mut self.relocator,
            ) {
                Ok(converted) => converted,
                Err(error) => {
                    log::error!("{}: {error}", doc.name);
                    result.failures.push(DocumentFailure {
                        name: doc.name.clone(),
                        error,
                    });
                    continue;
                }
            };

            if converted.is_empty() {
                log::info!("{}: no content, skipped", doc.name);
                result.omitted.push(doc.name.clone());
                continue;
            }

            for asset in converted.assets {
                if seen_assets.insert(asset.clone()) {
                    result.assets.push(asset);
                }
            }

            let output = self.options.output_name(&doc.name);
            log::debug!("{} -> {output}", doc.name);
            if result
                .documents
                .insert(output.clone(), converted.markdown)
                .is_some()
            {
                log::warn!("{output} is produced by more than one page; keeping {}", doc.name);
            }
        }

        let index = self
            .options
            .index_page
            .as_deref()
            .and_then(|index| documents.iter().find(|d| d.is_named(index)));
        if let Some(index) = index {
            result.toc = build_summary(&index.dom, self.options);
            match result.toc {
                Some(_) => result.toc_source = Some(index.name.clone()),
                None => log::debug!("{}: no links, no table of contents", index.name),
            }
        }

        result
    }
}

/// Convert a batch of pages with `std::fs` asset handling.
pub fn convert(documents: &[SourceDocument], options: &ConvertOptions) -> BatchResult {
    Batch::new(options).run(documents)
}
