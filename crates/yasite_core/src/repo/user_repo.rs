//! User repository contracts and SQLite implementation.

use crate::model::user::{User, UserId};
use crate::repo::error::{unique_conflict_or, RepoResult};
use crate::repo::{ensure_tables_ready, parse_user_id};
use rusqlite::{params, Connection, Row, ToSql};

/// Repository interface for site users.
pub trait UserRepository {
    /// Inserts one user; duplicate usernames yield `RepoError::Conflict`.
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["users"])?;
        Ok(Self { conn })
    }

    fn query_one(&self, where_clause: &str, value: &dyn ToSql) -> RepoResult<Option<User>> {
        let sql = format!("SELECT uuid, username FROM users WHERE {where_clause};");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([value])?;
        match rows.next()? {
            Some(row) => parse_user_row(row).map(Some),
            None => Ok(None),
        }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        self.conn
            .execute(
                "INSERT INTO users (uuid, username) VALUES (?1, ?2);",
                params![user.id.to_string(), user.username.as_str()],
            )
            .map_err(|err| unique_conflict_or(err, "username", user.username.as_str()))?;
        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.query_one("uuid = ?1", &id.to_string())
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.query_one("username = ?1", &username)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let uuid: String = row.get("uuid")?;
    Ok(User {
        id: parse_user_id(&uuid, "users.uuid")?,
        username: row.get("username")?,
    })
}
