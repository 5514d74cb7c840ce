//! Directory-backed content store.
//!
//! Every non-directory entry of the source directory becomes one project:
//! the file stem is the title and the body, run through a markdown-to-HTML
//! conversion, is the description. There is no record file and no database —
//! the filesystem is the data source.
//!
//! Entries are sorted by filename so enumeration order is stable across
//! filesystems; raw `read_dir` order is not guaranteed anywhere.

use super::{ContentStore, StoreError};
use crate::project::Project;
use async_trait::async_trait;
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::PathBuf;

pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new(source);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

#[async_trait]
impl ContentStore for DirStore {
    async fn load_all(&self) -> Result<Vec<Project>, StoreError> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        let mut projects = Vec::with_capacity(files.len());
        for path in &files {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let body = fs::read_to_string(path)?;

            projects.push(Project {
                title,
                short: String::new(),
                image_url: String::new(),
                description: markdown_to_html(&body),
                date: String::new(),
            });
        }

        Ok(projects)
    }
}
