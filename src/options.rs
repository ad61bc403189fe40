//! Conversion settings.

use std::path::{Path, PathBuf};

/// Class tokens that mark a container as a note by default.
pub const DEFAULT_NOTE_CLASSES: &[&str] = &["note", "callout"];

/// Configuration shared by every page of a batch.
///
/// ```
/// use hintdown::ConvertOptions;
///
/// let options = ConvertOptions::new()
///     .with_note_classes(["warning-box"])
///     .with_hint_style("warning")
///     .with_index_page(None);
/// assert!(options.is_note_class("warning-box"));
/// assert!(!options.is_note_class("note"));
/// ```
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Class tokens that turn a container into a hint block.
    pub note_classes: Vec<String>,
    /// Value of the `style` argument of emitted hint blocks.
    pub hint_style: String,
    /// Extension (without the dot) of produced documents.
    pub target_extension: String,
    /// Name of the asset folder that image references point into.
    pub media_dir: String,
    /// Directory images are copied to. `None` means `<base dir>/<media_dir>`
    /// for each page.
    pub media_root: Option<PathBuf>,
    /// Prepend `# <title>` when a page declares a title.
    pub title_heading: bool,
    /// Name of the page whose links become the table of contents.
    pub index_page: Option<String>,
    /// File name of the generated table of contents.
    pub toc_file: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            note_classes: DEFAULT_NOTE_CLASSES.iter().map(|s| s.to_string()).collect(),
            hint_style: "info".to_string(),
            target_extension: "md".to_string(),
            media_dir: "media".to_string(),
            media_root: None,
            title_heading: true,
            index_page: Some("index.html".to_string()),
            toc_file: "SUMMARY.md".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.note_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hint_style(mut self, style: impl Into<String>) -> Self {
        self.hint_style = style.into();
        self
    }

    pub fn with_target_extension(mut self, extension: impl Into<String>) -> Self {
        self.target_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_media_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.media_root = Some(root.into());
        self
    }

    pub fn with_title_heading(mut self, enabled: bool) -> Self {
        self.title_heading = enabled;
        self
    }

    pub fn with_index_page(mut self, page: Option<&str>) -> Self {
        self.index_page = page.map(str::to_string);
        self
    }

    pub fn with_toc_file(mut self, name: impl Into<String>) -> Self {
        self.toc_file = name.into();
        self
    }

    /// Whether `class` is one of the configured note tokens.
    pub fn is_note_class(&self, class: &str) -> bool {
        self.note_classes.iter().any(|c| c == class)
    }

    /// Where images referenced by a page in `base_dir` are copied to.
    pub fn media_root_for(&self, base_dir: &Path) -> PathBuf {
        match &self.media_root {
            Some(root) => root.clone(),
            None => base_dir.join(&self.media_dir),
        }
    }

    /// Output file name for an input page: `guide/setup.html` → `guide/setup.md`.
    pub fn output_name(&self, input: &str) -> String {
        Path::new(input)
            .with_extension(&self.target_extension)
            .to_string_lossy()
            .into_owned()
    }
}
