//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist personal notes addressed by globally unique slugs.
//! - Report slug collisions as `RepoError::Conflict` from the write itself.
//!
//! # Invariants
//! - `slug` uniqueness is enforced by the `notes.slug` UNIQUE constraint.
//! - Author listings are ordered by insertion (`id ASC`).
//! - `author_uuid` is never rewritten after insert.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::user::UserId;
use crate::repo::error::{unique_conflict_or, RepoError, RepoResult};
use crate::repo::{ensure_tables_ready, parse_user_id};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT id, title, text, slug, author_uuid FROM notes";

/// Repository interface for personal notes.
pub trait NoteRepository {
    /// Inserts one note; a taken slug yields `RepoError::Conflict` and no row.
    fn create_note(&self, author: UserId, draft: &NoteDraft) -> RepoResult<Note>;
    fn get_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>>;
    fn list_by_author(&self, author: UserId) -> RepoResult<Vec<Note>>;
    /// Replaces title/text/slug; a slug taken by another note yields
    /// `RepoError::Conflict` and leaves the row unchanged.
    fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["users", "notes"])?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, author: UserId, draft: &NoteDraft) -> RepoResult<Note> {
        self.conn
            .execute(
                "INSERT INTO notes (title, text, slug, author_uuid) VALUES (?1, ?2, ?3, ?4);",
                params![
                    draft.title.as_str(),
                    draft.text.as_str(),
                    draft.slug.as_str(),
                    author.to_string(),
                ],
            )
            .map_err(|err| unique_conflict_or(err, "slug", draft.slug.as_str()))?;
        Ok(Note {
            id: self.conn.last_insert_rowid(),
            title: draft.title.clone(),
            text: draft.text.clone(),
            slug: draft.slug.clone(),
            author,
        })
    }

    fn get_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE slug = ?1;"))?;
        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => parse_note_row(row).map(Some),
            None => Ok(None),
        }
    }

    fn list_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE author_uuid = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes SET title = ?2, text = ?3, slug = ?4 WHERE id = ?1;",
                params![
                    id,
                    draft.title.as_str(),
                    draft.text.as_str(),
                    draft.slug.as_str()
                ],
            )
            .map_err(|err| unique_conflict_or(err, "slug", draft.slug.as_str()))?;
        if changed == 0 {
            return Err(RepoError::not_found("note", id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("note", id));
        }
        Ok(())
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count {count}")))
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let author_uuid: String = row.get("author_uuid")?;
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        text: row.get("text")?,
        slug: row.get("slug")?,
        author: parse_user_id(&author_uuid, "notes.author_uuid")?,
    })
}
