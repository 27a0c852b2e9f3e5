//! Core domain logic for the news site and the personal notes app.
//! This crate is the single source of truth for ownership, feed ordering and
//! form validation rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod route;
pub mod service;

pub use config::{AnonymousMutation, ConfigError, SiteConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::comment::{Comment, CommentId, NewComment};
pub use model::identity::{Authorizable, Identity, Visibility};
pub use model::news::{NewNewsItem, NewsId, NewsItem};
pub use model::note::{Note, NoteDraft, NoteId};
pub use model::user::{User, UserId};
pub use policy::{can_mutate, can_view, Denial};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::error::{RepoError, RepoResult};
pub use repo::news_repo::{NewsRepository, SqliteNewsRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use route::Route;
pub use service::error::{ServiceError, ServiceResult};
pub use service::feed::{comment_thread, home_feed, notes_feed};
pub use service::news_service::{
    CommentDeletePage, CommentEditPage, CommentForm, HomePage, NewsDetailPage, NewsService,
};
pub use service::note_service::{
    NoteDeletePage, NoteDetailPage, NoteForm, NoteFormPage, NoteService, NotesListPage,
};
pub use service::outcome::{Field, FieldError, HttpStatus, Outcome};
pub use service::slug::slugify;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
