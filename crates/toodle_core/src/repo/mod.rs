//! Repository layer over the Toodle SQLite schema.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per record type.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Writes validate records before any SQL mutation.
//! - Reads reject malformed persisted state instead of masking it.
//! - Missing rows surface as `RepoError::NotFound`, unique violations as
//!   `RepoError::Conflict`.

use crate::db::DbError;
use crate::model::ModelValidationError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod item_repo;
pub mod label_repo;
pub mod login_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every record type.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound { entity: &'static str, key: String },
    Conflict { entity: &'static str, key: String },
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Conflict { entity, key } => write!(f, "{entity} already exists: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "store is missing required table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::Conflict { .. }
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
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

/// Maps a unique-constraint failure to `Conflict`, passing other errors
/// through unchanged.
pub(crate) fn map_conflict(
    err: rusqlite::Error,
    entity: &'static str,
    key: &str,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RepoError::Conflict {
                entity,
                key: key.to_string(),
            }
        }
        _ => err.into(),
    }
}

pub(crate) fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
