//! Static site export.
//!
//! Materializes the whole site on disk instead of serving it:
//!
//! ```text
//! out/
//! ├── index.html                 # full registry
//! ├── projects/
//! │   ├── <title>.html           # one per project
//! │   └── ...
//! └── static/**                  # asset tree, mirrored
//! ```
//!
//! The export is staged: everything is written into a fresh sibling directory
//! and a final rename swaps it into place. A failure mid-export leaves the
//! previous output untouched; only the staging directory is abandoned.
//!
//! The asset copy preserves relative paths, and `fs::copy` carries permission
//! bits. Symlinks are skipped with a warning — a static asset tree has no
//! business containing them.

use crate::registry::ProjectRegistry;
use crate::render::{RenderContext, render};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What an export run produced, for the end-of-run summary.
#[derive(Debug, Default, PartialEq)]
pub struct ExportReport {
    pub pages: usize,
    pub assets: usize,
}

/// Render the whole registry plus the asset tree into `output_dir`.
///
/// `asset_dir` may be absent, in which case no `static/` tree is produced.
pub fn export_all(
    registry: &ProjectRegistry,
    asset_dir: &Path,
    output_dir: &Path,
) -> Result<ExportReport, ExportError> {
    let staging = staging_path(output_dir);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let result = export_into(registry, asset_dir, &staging);
    if result.is_err() {
        // best effort; the staging dir is throwaway either way
        let _ = fs::remove_dir_all(&staging);
        return result;
    }

    // Swap staging into place. Not atomic across the remove+rename pair, but
    // the window is tiny and a crash inside it can only lose the old output,
    // never mix old and new.
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
    }
    fs::rename(&staging, output_dir)?;

    result
}

fn export_into(
    registry: &ProjectRegistry,
    asset_dir: &Path,
    staging: &Path,
) -> Result<ExportReport, ExportError> {
    let mut report = ExportReport::default();
    let projects = registry.snapshot();

    let index = render(&RenderContext::Index {
        projects: &projects,
    });
    fs::write(staging.join("index.html"), index.into_string())?;
    report.pages += 1;

    let projects_dir = staging.join("projects");
    fs::create_dir_all(&projects_dir)?;
    for project in projects.iter() {
        let page = render(&RenderContext::Project { project });
        fs::write(projects_dir.join(project.output_filename()), page.into_string())?;
        report.pages += 1;
    }

    if asset_dir.is_dir() {
        report.assets = copy_tree(asset_dir, &staging.join("static"))?;
    }

    Ok(report)
}

/// Recursively mirror `src` under `dst`, top-down.
///
/// Returns the number of files copied. Directories are created with
/// intermediates; file permission bits travel with `fs::copy`.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize, ExportError> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        if entry.path_is_symlink() {
            warn!(path = %entry.path().display(), "skipping symlink in asset tree");
            continue;
        }
        // every walked path is under src, so strip_prefix cannot fail
        let rel = entry.path().strip_prefix(src).unwrap();
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Staging directory next to the target, so the final rename stays on one
/// filesystem.
fn staging_path(output_dir: &Path) -> PathBuf {
    let name = output_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string());
    match output_dir.parent() {
        Some(parent) => parent.join(format!(".{name}-staging")),
        None => PathBuf::from(format!(".{name}-staging")),
    }
}
