//! News site use-case service.
//!
//! # Responsibility
//! - Render the home feed and news detail pages.
//! - Create, edit and delete comments on behalf of an identity.
//!
//! # Invariants
//! - Anonymous comment creation persists nothing and asks for login.
//! - Non-owners never learn whether a comment exists: they get `NotFound`.
//! - Comment text containing a banned word is rejected before any write.
//! - Comment text is stored trimmed.
//! - Successful comment mutations redirect to the parent news comment anchor.

use crate::config::SiteConfig;
use crate::model::comment::{Comment, CommentId, NewComment};
use crate::model::identity::Identity;
use crate::model::news::{NewsId, NewsItem};
use crate::policy::{can_mutate, mutation_denial};
use crate::repo::comment_repo::CommentRepository;
use crate::repo::error::RepoError;
use crate::repo::news_repo::NewsRepository;
use crate::route::{news_comments_url, Route};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::feed::{comment_thread, home_feed};
use crate::service::moderation::BannedWordFilter;
use crate::service::outcome::{Field, FieldError, Outcome};
use log::info;

/// Comment submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Home page context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    /// Newest first, at most `news_count_on_home_page` items.
    pub news: Vec<NewsItem>,
}

/// News detail page context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDetailPage {
    pub news: NewsItem,
    /// Oldest first.
    pub comments: Vec<Comment>,
    /// Present only for authenticated identities.
    pub comment_form: Option<CommentForm>,
}

/// Comment edit page context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEditPage {
    pub comment: Comment,
    pub form: CommentForm,
}

/// Comment delete confirmation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDeletePage {
    pub comment: Comment,
}

/// News site facade over news and comment repositories.
pub struct NewsService<N: NewsRepository, C: CommentRepository> {
    news: N,
    comments: C,
    config: SiteConfig,
    filter: BannedWordFilter,
}

impl<N: NewsRepository, C: CommentRepository> NewsService<N, C> {
    pub fn new(news: N, comments: C, config: SiteConfig) -> Self {
        let filter = BannedWordFilter::from_config(&config);
        Self {
            news,
            comments,
            config,
            filter,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Home feed; available to every identity.
    pub fn home_page(&self, _identity: &Identity) -> ServiceResult<Outcome<HomePage>> {
        let news = home_feed(&self.news, &self.config)?;
        Ok(Outcome::Render(HomePage { news }))
    }

    /// News item with its comment thread; the comment form is offered to
    /// authenticated identities only.
    pub fn detail_page(
        &self,
        identity: &Identity,
        news_id: NewsId,
    ) -> ServiceResult<Outcome<NewsDetailPage>> {
        let Some(news) = self.news.get_news(news_id)? else {
            return Ok(Outcome::NotFound);
        };
        let comments = comment_thread(&self.comments, news_id)?;
        let comment_form = identity.is_authenticated().then(CommentForm::default);
        Ok(Outcome::Render(NewsDetailPage {
            news,
            comments,
            comment_form,
        }))
    }

    /// Posts a comment to a news item as `identity`.
    pub fn post_comment(
        &self,
        identity: &Identity,
        news_id: NewsId,
        form: &CommentForm,
    ) -> ServiceResult<Outcome<()>> {
        let Some(author) = identity.user_id() else {
            info!("event=comment_create module=news status=denied reason=anonymous news_id={news_id}");
            return Ok(Outcome::auth_required(Route::NewsDetail(news_id).path()));
        };
        if self.news.get_news(news_id)?.is_none() {
            return Ok(Outcome::NotFound);
        }
        let text = match self.validate_text(&form.text) {
            Ok(text) => text,
            Err(error) => {
                info!("event=comment_create module=news status=invalid news_id={news_id}");
                return Ok(Outcome::invalid(error));
            }
        };

        let created = self.comments.create_comment(&NewComment {
            news_id,
            author,
            text: text.to_string(),
            created_at: None,
        })?;
        info!(
            "event=comment_create module=news status=ok news_id={} comment_id={}",
            news_id, created.id
        );
        Ok(Outcome::Redirect(news_comments_url(news_id)))
    }

    /// Edit page for a comment owned by `identity`.
    pub fn comment_edit_page(
        &self,
        identity: &Identity,
        comment_id: CommentId,
    ) -> ServiceResult<Outcome<CommentEditPage>> {
        let resume_url = Route::CommentEdit(comment_id).path();
        let comment = match self.owned_comment(identity, comment_id, resume_url)? {
            Ok(comment) => comment,
            Err(denied) => return Ok(denied),
        };
        let form = CommentForm::new(comment.text.clone());
        Ok(Outcome::Render(CommentEditPage { comment, form }))
    }

    /// Replaces comment text when `identity` owns the comment.
    pub fn update_comment(
        &self,
        identity: &Identity,
        comment_id: CommentId,
        form: &CommentForm,
    ) -> ServiceResult<Outcome<()>> {
        let resume_url = Route::CommentEdit(comment_id).path();
        let comment = match self.owned_comment(identity, comment_id, resume_url)? {
            Ok(comment) => comment,
            Err(denied) => return Ok(denied),
        };
        let text = match self.validate_text(&form.text) {
            Ok(text) => text,
            Err(error) => {
                info!("event=comment_update module=news status=invalid comment_id={comment_id}");
                return Ok(Outcome::invalid(error));
            }
        };

        match self.comments.update_comment_text(comment_id, text) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => return Ok(Outcome::NotFound),
            Err(err) => return Err(err.into()),
        }
        info!("event=comment_update module=news status=ok comment_id={comment_id}");
        Ok(Outcome::Redirect(news_comments_url(comment.news_id)))
    }

    /// Delete confirmation page for a comment owned by `identity`.
    pub fn comment_delete_page(
        &self,
        identity: &Identity,
        comment_id: CommentId,
    ) -> ServiceResult<Outcome<CommentDeletePage>> {
        let resume_url = Route::CommentDelete(comment_id).path();
        Ok(match self.owned_comment(identity, comment_id, resume_url)? {
            Ok(comment) => Outcome::Render(CommentDeletePage { comment }),
            Err(denied) => denied,
        })
    }

    /// Deletes a comment when `identity` owns it.
    pub fn delete_comment(
        &self,
        identity: &Identity,
        comment_id: CommentId,
    ) -> ServiceResult<Outcome<()>> {
        let resume_url = Route::CommentDelete(comment_id).path();
        let comment = match self.owned_comment(identity, comment_id, resume_url)? {
            Ok(comment) => comment,
            Err(denied) => return Ok(denied),
        };

        match self.comments.delete_comment(comment_id) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => return Ok(Outcome::NotFound),
            Err(err) => return Err(err.into()),
        }
        info!("event=comment_delete module=news status=ok comment_id={comment_id}");
        Ok(Outcome::Redirect(news_comments_url(comment.news_id)))
    }

    /// Loads a comment and checks ownership; the inner `Err` is the outcome
    /// to return for missing or foreign comments.
    fn owned_comment<T>(
        &self,
        identity: &Identity,
        comment_id: CommentId,
        resume_url: String,
    ) -> Result<Result<Comment, Outcome<T>>, ServiceError> {
        match self.comments.get_comment(comment_id)? {
            Some(comment) if can_mutate(identity, &comment) => Ok(Ok(comment)),
            _ => {
                info!("event=comment_access module=news status=denied comment_id={comment_id}");
                let denial = mutation_denial(identity, self.config.anonymous_mutation);
                Ok(Err(Outcome::from_denial(denial, resume_url)))
            }
        }
    }

    /// Returns the trimmed text to persist.
    fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str, FieldError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FieldError::required(Field::Text));
        }
        if self.filter.find(text).is_some() {
            return Err(FieldError::new(
                Field::Text,
                self.config.banned_word_warning.clone(),
            ));
        }
        Ok(text)
    }
}
