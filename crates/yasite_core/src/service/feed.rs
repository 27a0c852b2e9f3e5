//! Feed assembly: ordered, visibility-filtered listings.
//!
//! # Invariants
//! - Home feed is newest-first and never longer than the configured size.
//! - Comment threads are oldest-first; the order is not configurable.
//! - Notes feed contains only notes the identity may view, in insertion order.

use crate::config::SiteConfig;
use crate::model::comment::Comment;
use crate::model::identity::Identity;
use crate::model::news::{NewsId, NewsItem};
use crate::model::note::Note;
use crate::policy::can_view;
use crate::repo::comment_repo::CommentRepository;
use crate::repo::error::RepoResult;
use crate::repo::news_repo::NewsRepository;
use crate::repo::note_repo::NoteRepository;

/// Home page news items, newest publication first.
pub fn home_feed<R: NewsRepository + ?Sized>(
    repo: &R,
    config: &SiteConfig,
) -> RepoResult<Vec<NewsItem>> {
    repo.list_latest(config.news_count_on_home_page)
}

/// All comments of one news item, oldest first.
pub fn comment_thread<R: CommentRepository + ?Sized>(
    repo: &R,
    news_id: NewsId,
) -> RepoResult<Vec<Comment>> {
    repo.list_for_news(news_id)
}

/// Notes visible to `identity`; empty for anonymous requesters.
pub fn notes_feed<R: NoteRepository + ?Sized>(
    repo: &R,
    identity: &Identity,
) -> RepoResult<Vec<Note>> {
    let Some(user_id) = identity.user_id() else {
        return Ok(Vec::new());
    };
    let notes = repo.list_by_author(user_id)?;
    Ok(notes
        .into_iter()
        .filter(|note| can_view(identity, note))
        .collect())
}
