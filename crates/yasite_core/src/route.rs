//! Named routes and their reversed paths.
//!
//! # Invariants
//! - Every reversed path starts and ends with `/`.
//! - Note slugs are `[-a-zA-Z0-9_]` only, so reversed paths need no escaping.

use crate::model::comment::CommentId;
use crate::model::news::NewsId;

/// Anchor of the comment section on a news detail page.
pub const COMMENTS_ANCHOR: &str = "#comments";

/// Named route of the news site, the notes app and the shared user pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    NewsDetail(NewsId),
    CommentEdit(CommentId),
    CommentDelete(CommentId),
    NotesList,
    NotesAdd,
    NotesDetail(String),
    NotesEdit(String),
    NotesDelete(String),
    NotesSuccess,
    Login,
    Logout,
    Signup,
}

impl Route {
    /// Stable route name in `namespace:name` form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "news:home",
            Self::NewsDetail(_) => "news:detail",
            Self::CommentEdit(_) => "news:edit",
            Self::CommentDelete(_) => "news:delete",
            Self::NotesList => "notes:list",
            Self::NotesAdd => "notes:add",
            Self::NotesDetail(_) => "notes:detail",
            Self::NotesEdit(_) => "notes:edit",
            Self::NotesDelete(_) => "notes:delete",
            Self::NotesSuccess => "notes:success",
            Self::Login => "users:login",
            Self::Logout => "users:logout",
            Self::Signup => "users:signup",
        }
    }

    /// Reverses the route into a site-relative path.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::NewsDetail(id) => format!("/news/{id}/"),
            Self::CommentEdit(id) => format!("/edit_comment/{id}/"),
            Self::CommentDelete(id) => format!("/delete_comment/{id}/"),
            Self::NotesList => "/notes/".to_string(),
            Self::NotesAdd => "/add/".to_string(),
            Self::NotesDetail(slug) => format!("/note/{slug}/"),
            Self::NotesEdit(slug) => format!("/edit/{slug}/"),
            Self::NotesDelete(slug) => format!("/delete/{slug}/"),
            Self::NotesSuccess => "/done/".to_string(),
            Self::Login => "/auth/login/".to_string(),
            Self::Logout => "/auth/logout/".to_string(),
            Self::Signup => "/auth/signup/".to_string(),
        }
    }
}

/// Detail page of a news item, scrolled to its comment section.
pub fn news_comments_url(news_id: NewsId) -> String {
    format!("{}{COMMENTS_ANCHOR}", Route::NewsDetail(news_id).path())
}

/// Login page that sends the user back to `next` after authentication.
pub fn login_url_with_next(next: &str) -> String {
    format!("{}?next={next}", Route::Login.path())
}
