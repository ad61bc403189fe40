//! Error types for hintdown operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a page.
///
/// Missing markup (no title, no `href`, no `src`) and missing image files are
/// not errors; they render as placeholders. Only filesystem failures while
/// relocating assets abort a page.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing the converted output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot create media directory {}: {source}", path.display())]
    MediaDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot copy {} to {}: {source}", from.display(), to.display())]
    AssetCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
