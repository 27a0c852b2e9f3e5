//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Uniqueness is enforced by storage constraints and surfaced as
//!   `RepoError::Conflict`, never by a separate read-then-write check.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.

pub mod comment_repo;
pub mod error;
pub mod news_repo;
pub mod note_repo;
pub mod user_repo;

use crate::model::user::UserId;
use error::{RepoError, RepoResult};
use rusqlite::Connection;
use uuid::Uuid;

/// Verifies that migrations created every table a repository depends on.
pub(crate) fn ensure_tables_ready(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [*table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

pub(crate) fn parse_user_id(value: &str, column: &str) -> RepoResult<UserId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
