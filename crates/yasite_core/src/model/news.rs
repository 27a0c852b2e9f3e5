//! News item model.

use crate::model::identity::{Authorizable, Visibility};
use crate::model::user::UserId;

/// Row id of a news item.
pub type NewsId = i64;

/// Published news item. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    /// Publication time in Unix epoch milliseconds.
    pub published_at: i64,
}

/// Insert payload for a news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNewsItem {
    pub title: String,
    pub text: String,
    /// Defaults to "now" when `None`.
    pub published_at: Option<i64>,
}

impl NewNewsItem {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            published_at: None,
        }
    }

    pub fn published_at(mut self, epoch_ms: i64) -> Self {
        self.published_at = Some(epoch_ms);
        self
    }
}

impl Authorizable for NewsItem {
    fn owner(&self) -> Option<UserId> {
        None
    }

    fn visibility(&self) -> Visibility {
        Visibility::Public
    }
}
