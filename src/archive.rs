//! Zip archive extraction.
//!
//! The first stage of the content pipeline. An input archive supplies the
//! project record file and the site's images in one bundle; extraction sorts
//! every entry into one of two destinations:
//!
//! ```text
//! input.zip
//! ├── projects.json        →  <content_dir>/projects.json
//! ├── images/hero.png      →  <image_dir>/hero.png      (flattened)
//! ├── images/deep/x.png    →  <image_dir>/x.png         (nesting discarded)
//! └── notes/todo.txt       →  <content_dir>/notes/todo.txt
//! ```
//!
//! Any entry whose path contains an `images` directory component lands in the
//! image directory under its base filename alone; everything else keeps its
//! relative path under the content directory. Bytes are copied through
//! unchanged and re-running overwrites previous output.
//!
//! Extraction is all-or-nothing in policy, not in effect: the first I/O error
//! aborts with no rollback, which is fine because the next run overwrites.
//! Entries that would escape the destination root are rejected outright.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("archive entry escapes the extraction root: {0}")]
    UnsafeEntry(String),
}

/// Destination directories for extracted entries.
#[derive(Debug, Clone)]
pub struct ExtractLayout {
    /// Receives `projects.json` and all non-image content.
    pub content_dir: PathBuf,
    /// Receives every file under an `images/` component, flattened.
    pub image_dir: PathBuf,
}

/// What an extraction run produced, for the end-of-stage summary.
#[derive(Debug, Default, PartialEq)]
pub struct ExtractReport {
    pub content_files: usize,
    pub images: usize,
}

enum Destination {
    Content(PathBuf),
    Image(PathBuf),
}

/// Route an entry path to its destination.
///
/// `projects.json` at the archive root is content; so is anything without an
/// `images` component. The base-name rule for images means two archive entries
/// `images/a/x.png` and `images/b/x.png` collide — last one wins, matching
/// the overwrite semantics of the whole extractor.
fn classify(rel: &Path, layout: &ExtractLayout) -> Destination {
    let under_images = rel
        .parent()
        .map(|p| p.components().any(|c| c.as_os_str() == "images"))
        .unwrap_or(false);

    if under_images {
        match rel.file_name() {
            Some(base) => Destination::Image(layout.image_dir.join(base)),
            None => Destination::Content(layout.content_dir.join(rel)),
        }
    } else {
        Destination::Content(layout.content_dir.join(rel))
    }
}

/// Extract every entry of the archive at `archive_path` into the layout.
pub fn extract(archive_path: &Path, layout: &ExtractLayout) -> Result<ExtractReport, ArchiveError> {
    let file = File::open(archive_path)?;
    let mut zip = zip::ZipArchive::new(file)?;

    fs::create_dir_all(&layout.content_dir)?;
    fs::create_dir_all(&layout.image_dir)?;

    let mut report = ExtractReport::default();

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;

        // enclosed_name rejects absolute paths and escaping traversal, but
        // still admits `.` and interior `..` components; only plain
        // components are accepted so destination paths stay literal
        let rel = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafeEntry(entry.name().to_string()))?;
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(ArchiveError::UnsafeEntry(entry.name().to_string()));
        }

        if entry.is_dir() {
            // Image directories are flattened away; only content keeps structure
            if let Destination::Content(path) = classify(&rel, layout) {
                fs::create_dir_all(path)?;
            }
            continue;
        }

        let dest = classify(&rel, layout);
        let path = match &dest {
            Destination::Content(p) | Destination::Image(p) => p.clone(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&path)?;
        io::copy(&mut entry, &mut out)?;

        match dest {
            Destination::Content(_) => report.content_files += 1,
            Destination::Image(_) => report.images += 1,
        }
    }

    Ok(report)
}
