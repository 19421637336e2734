//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing `SqliteForumStore`.
//! - Apply the forum schema migrations in version order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Foreign keys are enforced on every connection handed out here, so
//!   `ON DELETE CASCADE` clauses are live.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening a forum database or bringing its schema up to date.
#[derive(Debug)]
pub enum DbError {
    /// Connection-level failure outside any migration step.
    Sqlite(rusqlite::Error),
    /// The file carries a schema written by a newer build.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
    /// A forum schema step failed; nothing from the pending batch was kept.
    Migration {
        version: u32,
        from_version: u32,
        source: rusqlite::Error,
    },
}

impl DbError {
    /// Schema version the error refers to, when it is tied to one.
    pub fn schema_version(&self) -> Option<u32> {
        match self {
            Self::Sqlite(_) => None,
            Self::UnsupportedSchemaVersion { db_version, .. } => Some(*db_version),
            Self::Migration { version, .. } => Some(*version),
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "forum database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "forum schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Migration {
                version,
                from_version,
                source,
            } => write!(
                f,
                "forum schema migration to v{version} failed (database left at v{from_version}): {source}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
