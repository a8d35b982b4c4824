//! Read collaborator for stored users and papers.
//!
//! # Invariants
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::{fetch_all, DbError, RecordMap};
use crate::model::paper::decode_keywords;
use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReadResult<T> = Result<T, ReadError>;

#[derive(Debug)]
pub enum ReadError {
    Db(DbError),
    InvalidData(String),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for ReadError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Stored `users` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: i64,
    pub login_name: String,
    pub name_ja: String,
    pub name_en: String,
    pub belong: String,
}

/// Stored `papers` row with keywords decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPaper {
    pub id: i64,
    pub class: String,
    pub title_ja: String,
    pub title_en: String,
    pub description_ja: String,
    pub description_en: String,
    pub keywords: Vec<String>,
    pub mail: String,
}

/// Lookups consumed by the writers.
pub trait UserReader {
    fn does_user_exist(&self, login_name: &str) -> ReadResult<bool>;
}

/// SQLite-backed reader over a borrowed connection or transaction.
pub struct SqliteReader<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReader<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn get_user(&self, login_name: &str) -> ReadResult<Option<StoredUser>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, login_name, name_ja, name_en, belong
             FROM users
             WHERE login_name = ?1;",
        )?;
        fetch_all(&mut stmt, [login_name])?
            .first()
            .map(parse_user_row)
            .transpose()
    }

    pub fn get_paper(&self, id: i64) -> ReadResult<Option<StoredPaper>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, class, title_ja, title_en, description_ja, description_en, keywords, mail
             FROM papers
             WHERE id = ?1;",
        )?;
        fetch_all(&mut stmt, [id])?
            .first()
            .map(parse_paper_row)
            .transpose()
    }

    /// Lists all papers in insertion order.
    pub fn list_papers(&self) -> ReadResult<Vec<StoredPaper>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, class, title_ja, title_en, description_ja, description_en, keywords, mail
             FROM papers
             ORDER BY id ASC;",
        )?;
        fetch_all(&mut stmt, [])?.iter().map(parse_paper_row).collect()
    }
}

impl UserReader for SqliteReader<'_> {
    fn does_user_exist(&self, login_name: &str) -> ReadResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE login_name = ?1 LIMIT 1;",
                [login_name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_user_row(row: &RecordMap) -> ReadResult<StoredUser> {
    Ok(StoredUser {
        id: integer_column(row, "users", "id")?,
        login_name: text_column(row, "users", "login_name")?,
        name_ja: text_column(row, "users", "name_ja")?,
        name_en: text_column(row, "users", "name_en")?,
        belong: text_column(row, "users", "belong")?,
    })
}

fn parse_paper_row(row: &RecordMap) -> ReadResult<StoredPaper> {
    let blob = text_column(row, "papers", "keywords")?;
    let keywords = decode_keywords(&blob).map_err(|err| {
        ReadError::InvalidData(format!("undecodable papers.keywords blob: {err}"))
    })?;

    Ok(StoredPaper {
        id: integer_column(row, "papers", "id")?,
        class: text_column(row, "papers", "class")?,
        title_ja: text_column(row, "papers", "title_ja")?,
        title_en: text_column(row, "papers", "title_en")?,
        description_ja: text_column(row, "papers", "description_ja")?,
        description_en: text_column(row, "papers", "description_en")?,
        keywords,
        mail: text_column(row, "papers", "mail")?,
    })
}

fn text_column(row: &RecordMap, table: &str, column: &str) -> ReadResult<String> {
    row.text(column)
        .map(str::to_string)
        .ok_or_else(|| ReadError::InvalidData(format!("expected text in {table}.{column}")))
}

fn integer_column(row: &RecordMap, table: &str, column: &str) -> ReadResult<i64> {
    row.integer(column)
        .ok_or_else(|| ReadError::InvalidData(format!("expected integer in {table}.{column}")))
}
