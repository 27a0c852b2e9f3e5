//! Comment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Threads are ordered by `created_at ASC, id ASC`; insertion order breaks
//!   timestamp ties.
//! - `author_uuid` and `news_id` are never rewritten after insert.

use crate::db::now_epoch_ms;
use crate::model::comment::{Comment, CommentId, NewComment};
use crate::model::news::NewsId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::{ensure_tables_ready, parse_user_id};
use rusqlite::{params, Connection, Row};

const COMMENT_SELECT_SQL: &str = "SELECT id, news_id, author_uuid, text, created_at FROM comments";

/// Repository interface for news comments.
pub trait CommentRepository {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<Comment>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Returns the full thread for one news item, oldest first.
    fn list_for_news(&self, news_id: NewsId) -> RepoResult<Vec<Comment>>;
    /// Replaces comment text only.
    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()>;
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
    fn count_comments(&self) -> RepoResult<u64>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["news", "users", "comments"])?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<Comment> {
        let created_at = comment.created_at.unwrap_or_else(now_epoch_ms);
        self.conn.execute(
            "INSERT INTO comments (news_id, author_uuid, text, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.news_id,
                comment.author.to_string(),
                comment.text.as_str(),
                created_at,
            ],
        )?;
        Ok(Comment {
            id: self.conn.last_insert_rowid(),
            news_id: comment.news_id,
            author: comment.author,
            text: comment.text.clone(),
            created_at,
        })
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_comment_row(row).map(Some),
            None => Ok(None),
        }
    }

    fn list_for_news(&self, news_id: NewsId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE news_id = ?1 ORDER BY created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([news_id])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }

    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments SET text = ?2 WHERE id = ?1;",
            params![id, text],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("comment", id));
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("comment", id));
        }
        Ok(())
    }

    fn count_comments(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative comment count {count}")))
    }
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let author_uuid: String = row.get("author_uuid")?;
    Ok(Comment {
        id: row.get("id")?,
        news_id: row.get("news_id")?,
        author: parse_user_id(&author_uuid, "comments.author_uuid")?,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    })
}
