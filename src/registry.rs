//! The in-process project collection.
//!
//! A [`ProjectRegistry`] holds the full ordered set of projects as an
//! immutable snapshot behind an atomic pointer. [`ProjectRegistry::reload`]
//! builds and validates a complete replacement, then swaps it in with a single
//! atomic store — request handlers reading concurrently either see the old
//! snapshot or the new one, never a partially built state.
//!
//! Validation happens here rather than in the stores because the invariants
//! are registry-wide: titles must be unique across the whole collection and
//! safe to use as URL segments and filenames. A reload that fails validation
//! leaves the previous snapshot untouched.

use crate::project::{self, Project, SlugError};
use crate::store::{ContentStore, StoreError};
use arc_swap::ArcSwap;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid project title: {0}")]
    InvalidTitle(#[from] SlugError),
    #[error("duplicate project title: {0:?}")]
    DuplicateTitle(String),
}

pub struct ProjectRegistry {
    snapshot: ArcSwap<Vec<Project>>,
}

impl ProjectRegistry {
    /// An empty registry; serves an empty index until the first reload.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Build a registry directly from records, validating the title invariant.
    pub fn from_projects(projects: Vec<Project>) -> Result<Self, RegistryError> {
        validate_titles(&projects)?;
        Ok(Self {
            snapshot: ArcSwap::from_pointee(projects),
        })
    }

    /// Replace the snapshot with a full load from `store`.
    ///
    /// Returns the number of projects loaded. Not incremental: the whole
    /// collection is fetched, validated, and swapped in one atomic store.
    pub async fn reload(&self, store: &dyn ContentStore) -> Result<usize, RegistryError> {
        let projects = store.load_all().await?;
        validate_titles(&projects)?;
        let count = projects.len();
        self.snapshot.store(Arc::new(projects));
        Ok(count)
    }

    /// The current snapshot, in load order.
    pub fn snapshot(&self) -> Arc<Vec<Project>> {
        self.snapshot.load_full()
    }

    /// Linear scan for the project whose title equals `slug` exactly.
    ///
    /// Case-sensitive, no normalization — callers strip any `.html` suffix
    /// before calling. A miss is `None`, never an empty record.
    pub fn find_by_slug(&self, slug: &str) -> Option<Project> {
        self.snapshot.load().iter().find(|p| p.title == slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.load().is_empty()
    }
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_titles(projects: &[Project]) -> Result<(), RegistryError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(projects.len());
    for p in projects {
        project::validate_slug(&p.title)?;
        if !seen.insert(&p.title) {
            return Err(RegistryError::DuplicateTitle(p.title.clone()));
        }
    }
    Ok(())
}
