//! Comment model.

use crate::model::identity::{Authorizable, Visibility};
use crate::model::news::NewsId;
use crate::model::user::UserId;

/// Row id of a comment.
pub type CommentId = i64;

/// User comment attached to exactly one news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    /// Parent news item.
    pub news_id: NewsId,
    pub author: UserId,
    pub text: String,
    /// Creation time in Unix epoch milliseconds.
    pub created_at: i64,
}

/// Insert payload for a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub news_id: NewsId,
    pub author: UserId,
    pub text: String,
    /// Defaults to "now" when `None`.
    pub created_at: Option<i64>,
}

impl Authorizable for Comment {
    fn owner(&self) -> Option<UserId> {
        Some(self.author)
    }

    fn visibility(&self) -> Visibility {
        Visibility::Public
    }
}
