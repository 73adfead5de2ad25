/// Result store
///
/// Append-only log of probe results in a local libsql (SQLite) file, behind
/// the [`ResultStore`] trait so callers never touch SQL or the stored
/// timestamp format.
pub mod migrations;
pub mod models;
pub mod repository;
pub mod timestamp;

use std::path::PathBuf;

use thiserror::Error;

pub use models::DailySummary;
pub use repository::{LibsqlStore, ResultStore};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result store at {} is unavailable: {source}", location.display())]
    Unavailable {
        location: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("could not apply schema migrations: {0}")]
    Migration(#[source] BoxError),

    #[error("could not persist probe result: {0}")]
    Persistence(#[source] BoxError),

    #[error("could not read probe history: {0}")]
    Query(#[source] BoxError),
}

impl StoreError {
    pub fn unavailable(location: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::Unavailable { location: location.into(), source: source.into() }
    }

    pub fn migration(source: impl Into<BoxError>) -> Self {
        Self::Migration(source.into())
    }

    pub fn persistence(source: impl Into<BoxError>) -> Self {
        Self::Persistence(source.into())
    }

    pub fn query(source: impl Into<BoxError>) -> Self {
        Self::Query(source.into())
    }
}
