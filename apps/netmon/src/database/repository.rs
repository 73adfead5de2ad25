use std::path::{Path, PathBuf};

use async_trait::async_trait;
use deadpool::managed::{Object, PoolConfig};
use libsql::params;
use tracing::debug;

use super::migrations;
use super::models::{DailySummary, PROBE_RESULT_COLUMNS, probe_result_from_row};
use super::timestamp;
use super::StoreError;
use crate::pool::{LibsqlManager, LibsqlPool};
use crate::probe::ProbeResult;

/// Storage capability used by the batch driver and the history service.
///
/// Results are only ever inserted and read; there is no update or delete.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Ensure the schema exists. Idempotent and non-destructive.
    async fn migrate(&self) -> Result<(), StoreError>;

    /// Persist `result` and return it with the store-assigned `id`.
    async fn save(&self, result: ProbeResult) -> Result<ProbeResult, StoreError>;

    /// At most `limit` results, most recent `created_at` first.
    async fn recent_results(&self, limit: u8) -> Result<Vec<ProbeResult>, StoreError>;

    /// Aggregates for the `days` most recent days that have results, newest first.
    async fn daily_summary(&self, days: u8) -> Result<Vec<DailySummary>, StoreError>;
}

/// LibSQL implementation backed by a local database file
pub struct LibsqlStore {
    pool: LibsqlPool,
    location: PathBuf,
}

impl LibsqlStore {
    /// Open (creating if needed) the database file at `location`.
    ///
    /// Fails with [`StoreError::Unavailable`] when the file or its parent
    /// directory cannot be created or opened.
    pub async fn open(location: impl AsRef<Path>) -> Result<Self, StoreError> {
        let location = location.as_ref().to_path_buf();

        if let Some(parent) = location.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::unavailable(&location, e))?;
        }

        let database = libsql::Builder::new_local(&location)
            .build()
            .await
            .map_err(|e| StoreError::unavailable(&location, e))?;

        let pool = deadpool::managed::Pool::builder(LibsqlManager::new(database))
            .config(PoolConfig::default())
            .build()
            .map_err(|e| StoreError::unavailable(&location, e))?;

        // Connect once up front so a bad location fails here, not on first use
        drop(pool.get().await.map_err(|e| StoreError::unavailable(&location, e))?);

        debug!("Opened result store at {}", location.display());
        Ok(Self { pool, location })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    async fn get_conn(&self) -> Result<Object<LibsqlManager>, deadpool::managed::PoolError<libsql::Error>> {
        self.pool.get().await
    }
}

#[async_trait]
impl ResultStore for LibsqlStore {
    async fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.get_conn().await.map_err(StoreError::migration)?;
        migrations::run_migrations(&conn).await.map_err(StoreError::migration)
    }

    async fn save(&self, result: ProbeResult) -> Result<ProbeResult, StoreError> {
        let conn = self.get_conn().await.map_err(StoreError::persistence)?;

        conn.execute(
            "INSERT INTO probe_results (url, created_at, status_code, success, error_text, duration_ms) VALUES (?, ?, ?, ?, ?, ?)",
            params![
                result.url.clone(),
                timestamp::to_storage(&result.created_at),
                i64::from(result.status_code),
                if result.success { 1 } else { 0 },
                result.error_text.clone(),
                result.duration_millis
            ],
        )
        .await
        .map_err(StoreError::persistence)?;

        Ok(result.with_id(conn.last_insert_rowid()))
    }

    async fn recent_results(&self, limit: u8) -> Result<Vec<ProbeResult>, StoreError> {
        let conn = self.get_conn().await.map_err(StoreError::query)?;
        let stmt = conn
            .prepare(&format!(
                "SELECT {PROBE_RESULT_COLUMNS} FROM probe_results ORDER BY created_at DESC, id DESC LIMIT ?"
            ))
            .await
            .map_err(StoreError::query)?;

        let mut rows = stmt.query(params![i64::from(limit)]).await.map_err(StoreError::query)?;
        let mut results = Vec::with_capacity(usize::from(limit));

        while let Some(row) = rows.next().await.map_err(StoreError::query)? {
            results.push(probe_result_from_row(&row)?);
        }

        Ok(results)
    }

    async fn daily_summary(&self, days: u8) -> Result<Vec<DailySummary>, StoreError> {
        let conn = self.get_conn().await.map_err(StoreError::query)?;
        let stmt = conn
            .prepare(&format!(
                "SELECT {} FROM daily_probe_summary ORDER BY day DESC LIMIT ?",
                DailySummary::COLUMNS
            ))
            .await
            .map_err(StoreError::query)?;

        let mut rows = stmt.query(params![i64::from(days)]).await.map_err(StoreError::query)?;
        let mut summaries = Vec::new();

        while let Some(row) = rows.next().await.map_err(StoreError::query)? {
            summaries.push(DailySummary::from_row(&row)?);
        }

        Ok(summaries)
    }
}
