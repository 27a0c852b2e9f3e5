//! Personal note model.
//!
//! # Invariants
//! - `slug` is unique across all notes, not per author.
//! - Notes are private: only the author may see them.

use crate::model::identity::{Authorizable, Visibility};
use crate::model::user::UserId;

/// Row id of a note.
pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    /// URL-safe unique address of the note.
    pub slug: String,
    pub author: UserId,
}

/// Fully resolved note fields ready for persistence.
///
/// The slug is already derived or validated at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl Authorizable for Note {
    fn owner(&self) -> Option<UserId> {
        Some(self.author)
    }

    fn visibility(&self) -> Visibility {
        Visibility::OwnerOnly
    }
}
