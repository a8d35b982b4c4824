//! SQLite connection handle, schema migrations and transaction plumbing.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the paper repository.
//! - Apply schema migrations in deterministic order.
//! - Provide the single transaction demarcation point for writes.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Writers must not touch `users`/`papers` before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fetch;
pub mod migrations;
mod open;
pub mod transaction;

pub use fetch::{fetch_all, RecordMap};
pub use open::{open_db, open_db_in_memory, open_with_config};
pub use transaction::transact;

pub type DbResult<T> = Result<T, DbError>;

/// Connection-level failure: the session could not be established or kept.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
