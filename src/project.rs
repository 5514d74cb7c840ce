//! The shared project record type.
//!
//! A [`Project`] is one portfolio entry. It is deserialized from the
//! `projects.json` record file, round-tripped through the database, and handed
//! to the renderer — the field names here are the wire format.
//!
//! The `title` doubles as the project's slug: it is the lookup key for
//! `/projects/<title>` requests and the output filename `<title>.html` in a
//! static export. [`validate_slug`] enforces that it is actually safe to use
//! that way; stores and the registry call it at load time so a bad title is a
//! startup error, not a broken link.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlugError {
    #[error("project title is empty")]
    Empty,
    #[error("project title {0:?} is a reserved path component")]
    Reserved(String),
    #[error("project title {0:?} contains unsafe character {1:?}")]
    UnsafeCharacter(String, char),
}

/// One portfolio entry.
///
/// `date` is a display string, never parsed. `description` is long-form
/// content; in directory mode it is HTML converted from markdown, in database
/// mode it is whatever the author stored — either way the renderer injects it
/// unescaped, so it is trusted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub short: String,
    pub image_url: String,
    pub description: String,
    pub date: String,
}

impl Project {
    /// The URL path segment this project is reachable under.
    pub fn slug(&self) -> &str {
        &self.title
    }

    /// Filename of this project's page in a static export.
    pub fn output_filename(&self) -> String {
        format!("{}.html", self.title)
    }
}

/// Characters that would break a title used as a filename or URL segment.
///
/// Path separators and the Windows-reserved set, plus `%`, `?` and `#` which
/// change meaning inside a URL.
const UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '%', '#'];

/// Check that a title is usable verbatim as a path segment and filename.
pub fn validate_slug(title: &str) -> Result<(), SlugError> {
    if title.trim().is_empty() {
        return Err(SlugError::Empty);
    }
    if title == "." || title == ".." {
        return Err(SlugError::Reserved(title.to_string()));
    }
    for c in title.chars() {
        if c.is_control() || UNSAFE_CHARS.contains(&c) {
            return Err(SlugError::UnsafeCharacter(title.to_string(), c));
        }
    }
    Ok(())
}
