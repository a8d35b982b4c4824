//! Entity writers and the generic single-column update.
//!
//! # Responsibility
//! - Validate user/paper input and insert one row per call.
//! - Keep transaction bookkeeping in `db::transact` only.
//!
//! # Invariants
//! - Every write runs inside one transaction; a failure leaves no row.
//! - `login_name` is unique: checked through `UserReader` inside the write
//!   transaction and backed by a unique index.
//! - Identifiers interpolated into SQL are always quoted and escaped;
//!   values are always bound.

use crate::config::WriterConfig;
use crate::db::{migrations, open_with_config, transact, DbError, DbResult};
use crate::model::paper::{encode_keywords, NewPaper};
use crate::model::user::NewUser;
use crate::model::validation::ValidationError;
use crate::repo::reader::{ReadError, SqliteReader, UserReader};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WriteResult<T> = Result<T, WriteError>;

/// Failure of one write call. The enclosing transaction is always rolled back.
#[derive(Debug)]
pub enum WriteError {
    Validation(ValidationError),
    /// Statement preparation, execution or commit failed in the driver.
    Persistence(DbError),
    /// Uniqueness lookup failed.
    Read(ReadError),
    Encoding(serde_json::Error),
    InvalidIdentifier(String),
    NotFound { table: String, id: i64 },
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Read(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "failed to encode keywords: {err}"),
            Self::InvalidIdentifier(name) => write!(f, "invalid SQL identifier `{name}`"),
            Self::NotFound { table, id } => write!(f, "row not found: {table}.id={id}"),
        }
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Read(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::InvalidIdentifier(_) | Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for WriteError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for WriteError {
    fn from(value: DbError) -> Self {
        Self::Persistence(value)
    }
}

impl From<rusqlite::Error> for WriteError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Persistence(DbError::Sqlite(value))
    }
}

impl From<ReadError> for WriteError {
    fn from(value: ReadError) -> Self {
        Self::Read(value)
    }
}

/// Write-side contract for the paper repository.
pub trait RecordWriter {
    /// Validates and inserts one user, returning its row id.
    fn add_user(&mut self, user: &NewUser) -> WriteResult<i64>;
    /// Validates and inserts one paper, returning its row id.
    fn add_paper(&mut self, paper: &NewPaper) -> WriteResult<i64>;
    /// Sets `table.column = value` on the row with `id`.
    fn update_column(&mut self, id: i64, table: &str, column: &str, value: Value)
        -> WriteResult<()>;
}

/// SQLite-backed writer. Owns its connection exclusively; the connection
/// is released on `close` or when the writer is dropped.
pub struct DbWriter {
    conn: Connection,
}

impl DbWriter {
    /// Opens the configured database and prepares it for writes.
    pub fn open(config: &WriterConfig) -> DbResult<Self> {
        Ok(Self {
            conn: open_with_config(config)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Self::open(&WriterConfig::in_memory())
    }

    /// Wraps an existing connection, applying pending migrations first.
    pub fn with_connection(mut conn: Connection) -> DbResult<Self> {
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Reader over the writer's connection, sees committed data only.
    pub fn reader(&self) -> SqliteReader<'_> {
        SqliteReader::new(&self.conn)
    }

    /// Closes the connection and reports any close failure.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_, err)) => {
                error!("event=db_close module=db status=error error={err}");
                Err(err.into())
            }
        }
    }
}

impl RecordWriter for DbWriter {
    fn add_user(&mut self, user: &NewUser) -> WriteResult<i64> {
        let id = transact(&mut self.conn, "add_user", |tx| -> WriteResult<i64> {
            let reader = SqliteReader::new(tx);
            let user = user.validate_with(|login_name| {
                reader.does_user_exist(login_name).map_err(WriteError::from)
            })?;

            tx.execute(
                "INSERT INTO users (login_name, name_ja, name_en, belong)
                 VALUES (?1, ?2, ?3, ?4);",
                params![user.login_name, user.name_ja, user.name_en, user.belong],
            )
            .map_err(map_user_insert_error)?;
            Ok(tx.last_insert_rowid())
        })?;

        info!("event=user_add module=writer status=ok id={id}");
        Ok(id)
    }

    fn add_paper(&mut self, paper: &NewPaper) -> WriteResult<i64> {
        let id = transact(&mut self.conn, "add_paper", |tx| -> WriteResult<i64> {
            let paper = paper.validate()?;
            let keywords = encode_keywords(&paper.keywords).map_err(WriteError::Encoding)?;

            tx.execute(
                "INSERT INTO papers (
                    class,
                    title_ja,
                    title_en,
                    description_ja,
                    description_en,
                    keywords,
                    mail
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    paper.class,
                    paper.title_ja,
                    paper.title_en,
                    paper.description_ja,
                    paper.description_en,
                    keywords,
                    paper.mail,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        info!("event=paper_add module=writer status=ok id={id}");
        Ok(id)
    }

    fn update_column(
        &mut self,
        id: i64,
        table: &str,
        column: &str,
        value: Value,
    ) -> WriteResult<()> {
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE id = ?2;",
            quote_identifier(table)?,
            quote_identifier(column)?
        );
        let table = table.to_string();

        transact(&mut self.conn, "update_column", move |tx| {
            let changed = tx.execute(&sql, params![value, id])?;
            if changed == 0 {
                return Err(WriteError::NotFound { table, id });
            }
            Ok(())
        })
    }
}

/// Quotes an identifier for interpolation, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> WriteResult<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(WriteError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

fn map_user_insert_error(err: rusqlite::Error) -> WriteError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            WriteError::Validation(ValidationError::DuplicateLoginName)
        }
        _ => err.into(),
    }
}
