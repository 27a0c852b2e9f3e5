//! Site user record.

use uuid::Uuid;

/// Stable user identifier.
pub type UserId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Unique login name.
    pub username: String,
}

impl User {
    /// Creates a user record with a freshly generated id.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }
}
