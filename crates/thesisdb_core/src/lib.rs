//! Transactional data-access layer for an academic paper repository.
//! Validates user and paper records and persists them to SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, DatabaseLocation, WriterConfig};
pub use db::{fetch_all, transact, DbError, DbResult, RecordMap};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::paper::{decode_keywords, encode_keywords, NewPaper, ValidatedPaper};
pub use model::user::{NewUser, ValidatedUser};
pub use model::validation::ValidationError;
pub use repo::reader::{ReadError, ReadResult, SqliteReader, StoredPaper, StoredUser, UserReader};
pub use repo::writer::{DbWriter, RecordWriter, WriteError, WriteResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
