//! Image asset relocation.
//!
//! Every image a page references is copied into a flat media folder keyed by
//! file name, and the page is rewritten to point at `media/<file name>`.
//! All filesystem access goes through [`AssetFs`]. A destination that
//! already holds the image's bytes is left alone, so re-running a
//! conversion writes nothing new.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::error::{Error, Result};

/// The filesystem operations asset relocation needs.
pub trait AssetFs {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. Must succeed if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy the file at `from` to `to`, replacing `to` if present.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether `to` exists and holds exactly the bytes of `from`.
    fn same_contents(&self, from: &Path, to: &Path) -> bool;
}

/// [`AssetFs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl AssetFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn same_contents(&self, from: &Path, to: &Path) -> bool {
        match (fs::metadata(from), fs::metadata(to)) {
            (Ok(a), Ok(b)) if a.is_file() && b.is_file() && a.len() == b.len() => {
                matches!((fs::read(from), fs::read(to)), (Ok(a), Ok(b)) if a == b)
            }
            _ => false,
        }
    }
}

impl<F: AssetFs + ?Sized> AssetFs for &F {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).copy(from, to)
    }

    fn same_contents(&self, from: &Path, to: &Path) -> bool {
        (**self).same_contents(from, to)
    }
}

/// An image that was found on disk and relocated into the media folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// The `src` attribute exactly as written in the page.
    pub src: String,
    /// Where the image was found.
    pub source: PathBuf,
    /// Where the image was copied to.
    pub destination: PathBuf,
}

impl AssetRef {
    /// File name shared by the destination and the rewritten reference.
    pub fn file_name(&self) -> Cow<'_, str> {
        self.destination
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }
}

/// Outcome of resolving an image `src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// The file exists and now lives in the media folder.
    Copied(AssetRef),
    /// The file does not exist; nothing was copied.
    Missing,
    /// The reference is a URL and is kept verbatim.
    Remote,
}

/// Copies images into media folders, remembering what it already placed.
///
/// One relocator serves a whole batch. Destinations are keyed by file name,
/// so two different images called `logo.png` collide: the later copy wins
/// and a warning is logged.
pub struct AssetRelocator<F: AssetFs> {
    fs: F,
    placed: HashMap<PathBuf, PathBuf>,
}

impl<F: AssetFs> AssetRelocator<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            placed: HashMap::new(),
        }
    }

    /// Resolve `src` against `base_dir` and copy the image into `media_root`.
    pub fn relocate(&mut self, src: &str, base_dir: &Path, media_root: &Path) -> Result<Relocation> {
        if is_remote(src) {
            return Ok(Relocation::Remote);
        }

        let source = resolve_source(src, base_dir);
        let Some(file_name) = source.file_name() else {
            return Ok(Relocation::Missing);
        };
        if !self.fs.exists(&source) {
            log::warn!("image not found: {src} (looked for {})", source.display());
            return Ok(Relocation::Missing);
        }

        let destination = media_root.join(file_name);
        let asset = AssetRef {
            src: src.to_string(),
            source,
            destination,
        };

        match self.placed.get(&asset.destination) {
            Some(previous) if *previous == asset.source => return Ok(Relocation::Copied(asset)),
            Some(previous) => log::warn!(
                "{} replaces {} in {}",
                asset.source.display(),
                previous.display(),
                asset.destination.display()
            ),
            None => {}
        }

        if asset.source != asset.destination
            && !self.fs.same_contents(&asset.source, &asset.destination)
        {
            self.fs
                .create_dir_all(media_root)
                .map_err(|source| Error::MediaDir {
                    path: media_root.to_path_buf(),
                    source,
                })?;
            self.fs
                .copy(&asset.source, &asset.destination)
                .map_err(|source| Error::AssetCopy {
                    from: asset.source.clone(),
                    to: asset.destination.clone(),
                    source,
                })?;
            log::debug!("copied {} -> {}", asset.source.display(), asset.destination.display());
        }

        self.placed
            .insert(asset.destination.clone(), asset.source.clone());
        Ok(Relocation::Copied(asset))
    }
}

/// Whether an image reference points off the local filesystem.
pub fn is_remote(src: &str) -> bool {
    if src.starts_with("//") {
        return true;
    }
    match src.split_once(':') {
        // A single letter before the colon is a Windows drive, not a scheme.
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Turn an image `src` into the filesystem path it names.
///
/// Query strings and fragments are dropped and percent-escapes decoded.
/// Absolute paths are used as-is, everything else is relative to `base_dir`.
pub fn resolve_source(src: &str, base_dir: &Path) -> PathBuf {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let path = Path::new(decoded.as_ref());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
