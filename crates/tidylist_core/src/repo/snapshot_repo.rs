//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full task-list snapshot under one fixed key.
//! - Restore snapshots, degrading absent or malformed data to empty.
//!
//! # Invariants
//! - `save_snapshot` overwrites the entire stored value in one statement.
//! - The stored value is the wire-format JSON array of tasks in display
//!   order.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::list::TaskList;
use crate::model::task::Task;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key holding the serialized task list.
pub const SNAPSHOT_KEY: &str = "todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying database failure.
    Db(DbError),
    /// Snapshot serialization failed before any write happened.
    Serialize(serde_json::Error),
    /// Connection was not opened through `open_db`; migrations missing.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required storage table is absent.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "snapshot serialization failed: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open via open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
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

/// Persistence contract for the task-list snapshot.
pub trait SnapshotRepository {
    /// Reads the persisted snapshot.
    ///
    /// A missing row or an unparsable value loads as the empty list; only
    /// transport failures return `Err`.
    fn load_snapshot(&self) -> RepoResult<TaskList>;

    /// Serializes the full list and overwrites the stored value.
    fn save_snapshot(&self, list: &TaskList) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over the `kv_store` table.
///
/// Owns its connection: the store is the sole writer of the snapshot and
/// keeps the connection for its whole lifetime.
pub struct SqliteSnapshotRepository {
    conn: Connection,
}

impl SqliteSnapshotRepository {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// Rejects connections that were not opened through `open_db`: the
    /// schema version must match this binary and the `kv_store` table must
    /// exist.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(&conn, "kv_store")? {
            return Err(RepoError::MissingRequiredTable("kv_store"));
        }
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    fn load_snapshot(&self) -> RepoResult<TaskList> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = stored else {
            return Ok(TaskList::new());
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => Ok(TaskList::from_tasks(tasks)),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=malformed key={SNAPSHOT_KEY} error={err}"
                );
                Ok(TaskList::new())
            }
        }
    }

    fn save_snapshot(&self, list: &TaskList) -> RepoResult<()> {
        let payload = serde_json::to_string(list.tasks()).map_err(RepoError::Serialize)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_KEY, payload],
        )?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
