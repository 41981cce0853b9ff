//! Snapshot store contract and SQLite implementation.
//!
//! The store mirrors browser local storage: a single string slot keyed by
//! [`RESTAURANTS_CACHE_KEY`] holding the JSON-serialized collection.

use crate::db::DbError;
use crate::model::restaurant::Restaurant;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key for the cached collection.
pub const RESTAURANTS_CACHE_KEY: &str = "restaurants";

pub type RepoResult<T> = Result<T, RepoError>;

/// Snapshot persistence error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize snapshot: {err}"),
            Self::InvalidData(message) => write!(f, "invalid cached snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Single-slot store for the last known collection.
pub trait SnapshotStore {
    /// Returns `None` when nothing has been cached yet.
    fn read_snapshot(&self) -> RepoResult<Option<Vec<Restaurant>>>;
    /// Overwrites the slot with the full collection.
    fn write_snapshot(&self, restaurants: &[Restaurant]) -> RepoResult<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn read_snapshot(&self) -> RepoResult<Option<Vec<Restaurant>>> {
        (**self).read_snapshot()
    }

    fn write_snapshot(&self, restaurants: &[Restaurant]) -> RepoResult<()> {
        (**self).write_snapshot(restaurants)
    }
}

/// SQLite-backed snapshot store over the `local_storage` table.
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
    key: &'static str,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, RESTAURANTS_CACHE_KEY)
    }

    /// Uses a caller-chosen slot, so several collections can share one file.
    pub fn with_key(conn: &'conn Connection, key: &'static str) -> Self {
        Self { conn, key }
    }

    /// Raw stored JSON, exposed for diagnostics.
    pub fn raw_value(&self) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [self.key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn read_snapshot(&self) -> RepoResult<Option<Vec<Restaurant>>> {
        let Some(raw) = self.raw_value()? else {
            info!(
                "event=cache_read module=repo status=ok key={} found=false",
                self.key
            );
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Restaurant>>(&raw) {
            Ok(restaurants) => {
                info!(
                    "event=cache_read module=repo status=ok key={} found=true count={}",
                    self.key,
                    restaurants.len()
                );
                Ok(Some(restaurants))
            }
            Err(err) => {
                warn!(
                    "event=cache_read module=repo status=error key={} error_code=invalid_snapshot error={}",
                    self.key, err
                );
                Err(RepoError::InvalidData(err.to_string()))
            }
        }
    }

    fn write_snapshot(&self, restaurants: &[Restaurant]) -> RepoResult<()> {
        let payload = serde_json::to_string(restaurants).map_err(RepoError::Serialize)?;

        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, payload],
        )?;

        info!(
            "event=cache_write module=repo status=ok key={} count={}",
            self.key,
            restaurants.len()
        );
        Ok(())
    }
}
