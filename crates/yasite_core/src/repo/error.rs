//! Repository error taxonomy.

use crate::db::{is_unique_violation, DbError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query error shared by all repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Target row does not exist.
    NotFound { entity: &'static str, key: String },
    /// A unique constraint rejected the write.
    Conflict { field: &'static str, value: String },
    /// Persisted row cannot be decoded into a domain record.
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
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Conflict { field, value } => {
                write!(f, "unique constraint conflict on {field}: `{value}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Maps a UNIQUE constraint failure to `RepoError::Conflict`.
///
/// Other failures (including foreign-key violations) stay transport errors.
pub(crate) fn unique_conflict_or(
    err: rusqlite::Error,
    field: &'static str,
    value: &str,
) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::Conflict {
            field,
            value: value.to_string(),
        }
    } else {
        err.into()
    }
}
