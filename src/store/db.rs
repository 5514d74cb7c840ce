//! SurrealDB-backed content store.
//!
//! Connection strings go through the `any` engine, so the same code path
//! serves `ws://host:8000` against a real server, `rocksdb://path` for local
//! file storage, and `mem://` for an embedded in-process engine in tests.
//!
//! [`DbStore::populate`] is deliberately destructive: it removes and redefines
//! the whole database before inserting, because the record file extracted from
//! the archive is the source of truth and stale rows must not survive a
//! redeploy. It is not transactional — a failure mid-load leaves the store
//! partially populated, and the process aborts rather than serve that state.

use super::{ContentStore, StoreError};
use crate::project::Project;
use async_trait::async_trait;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tokio::time::timeout;

/// Bound on connection establishment and the follow-up health check.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const NAMESPACE: &str = "folio";
const DATABASE: &str = "portfolio";
const TABLE: &str = "project";

pub struct DbStore {
    db: Surreal<Any>,
}

impl DbStore {
    /// Connect to the database at `uri`, bounded by `connect_timeout`.
    ///
    /// Fails if the endpoint is unreachable within the timeout or the health
    /// check does not pass. Callers treat this as fatal; there are no retries.
    pub async fn connect(uri: &str, connect_timeout: Duration) -> Result<Self, StoreError> {
        let db = timeout(connect_timeout, surrealdb::engine::any::connect(uri))
            .await
            .map_err(|_| StoreError::ConnectTimeout(connect_timeout))??;
        timeout(connect_timeout, db.health())
            .await
            .map_err(|_| StoreError::ConnectTimeout(connect_timeout))??;
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;
        Ok(Self { db })
    }

    /// Drop and recreate the database, then insert `records` sequentially.
    ///
    /// Any insert failure aborts the whole load.
    pub async fn populate(&self, records: &[Project]) -> Result<(), StoreError> {
        self.db
            .query(format!("REMOVE DATABASE IF EXISTS {DATABASE}"))
            .await?
            .check()?;
        self.db
            .query(format!("DEFINE DATABASE {DATABASE}"))
            .await?
            .check()?;
        self.db
            .query(format!("DEFINE TABLE {TABLE} SCHEMALESS"))
            .await?
            .check()?;

        for record in records {
            let _created: Option<Project> =
                self.db.create(TABLE).content(record.clone()).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for DbStore {
    /// Unfiltered select of the whole table, in cursor order.
    ///
    /// The server defines the order — typically insertion order, but nothing
    /// downstream may rely on it.
    async fn load_all(&self) -> Result<Vec<Project>, StoreError> {
        let projects: Vec<Project> = self.db.select(TABLE).await?;
        Ok(projects)
    }
}
