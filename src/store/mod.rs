//! Where project records come from.
//!
//! A [`ContentStore`] produces the full ordered collection of [`Project`]
//! records. Two implementations exist:
//!
//! - [`DbStore`] — a SurrealDB-backed store. Records are bulk-loaded from the
//!   extracted `projects.json` with [`DbStore::populate`] and read back with
//!   an unfiltered select. Persists across restarts when pointed at a real
//!   server; `mem://` gives an embedded throwaway engine for tests.
//! - [`DirStore`] — a directory of markdown files, one project per file.
//!   No archive or database involved.
//!
//! The registry only needs `load_all`, so that is all the trait carries;
//! `populate` and `connect` are database-specific and live on [`DbStore`].

mod db;
mod dir;

pub use db::{DEFAULT_CONNECT_TIMEOUT, DbStore};
pub use dir::DirStore;

use crate::project::Project;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] surrealdb::Error),
    #[error("database unreachable within {0:?}")]
    ConnectTimeout(std::time::Duration),
}

/// A source of project records.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load every record the store holds.
    ///
    /// Ordering is store-defined: directory stores sort by filename, the
    /// database returns cursor order.
    async fn load_all(&self) -> Result<Vec<Project>, StoreError>;
}
